/// Renders floating point values the way location platforms print them: the shortest representation
/// that round-trips, always carrying a decimal point.
pub trait DecimalString {
    fn to_decimal_string(self) -> String;
}

macro_rules! impl_decimal_string {
    ($($t:ty)*) => ($(
        impl DecimalString for $t {
            fn to_decimal_string(self) -> String {
                // Debug keeps the trailing ".0" that Display drops for whole numbers
                format!("{:?}", self)
            }
        }
    )*)
}

impl_decimal_string! { f32 f64 }

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0.0")]
    #[case(-0.0, "-0.0")]
    #[case(12.0, "12.0")]
    #[case(51.8615899, "51.8615899")]
    #[case(-122.084, "-122.084")]
    fn to_decimal_string_f64(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(input.to_decimal_string(), expected);
    }

    #[rstest]
    #[case(0.0, "0.0")]
    #[case(3.5, "3.5")]
    fn to_decimal_string_f32(#[case] input: f32, #[case] expected: &str) {
        assert_eq!(input.to_decimal_string(), expected);
    }
}
