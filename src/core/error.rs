/// Data that cannot be classified.
#[derive(Clone, Debug, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidInput {
    #[display("no known prices to rank against")]
    EmptyPriceSeries,

    #[display("unparsable price `{value}`")]
    UnparsablePrice { value: String },

    #[display("price `{value}` is not a finite number")]
    NonFinitePrice { value: f64 },

    #[display("percentage `{value}` is out of range 0-100")]
    PercentOutOfRange { value: u32 },
}
