/// A postal address found by reverse geocoding a coordinate. Every part is optional, geocoders only return what they know.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ResolvedAddress {
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl ResolvedAddress {
    /// Multi-line text for the address field. The house number shares a line with the street, every other present
    /// part ends with its own line break. Missing parts are skipped without leaving a blank line.
    pub fn to_display_text(&self) -> String {
        let mut text = String::from("Address: \n");

        if let Some(house_number) = &self.house_number {
            text.push_str(house_number);
            text.push(' ');
        }

        for part in [&self.street, &self.locality, &self.postal_code, &self.country].into_iter().flatten() {
            text.push_str(part);
            text.push('\n');
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn skips_a_missing_postal_code_without_a_blank_line() {
        let address = ResolvedAddress {
            house_number: some("123"),
            street: some("Main St"),
            locality: some("Springfield"),
            postal_code: None,
            country: some("USA"),
        };

        assert_eq!(address.to_display_text(), "Address: \n123 Main St\nSpringfield\nUSA\n");
    }

    #[test]
    fn renders_every_part_when_complete() {
        let address = ResolvedAddress {
            house_number: some("1600"),
            street: some("Amphitheatre Parkway"),
            locality: some("Mountain View"),
            postal_code: some("94043"),
            country: some("United States"),
        };

        assert_eq!(
            address.to_display_text(),
            "Address: \n1600 Amphitheatre Parkway\nMountain View\n94043\nUnited States\n"
        );
    }

    #[test]
    fn house_number_without_street_runs_into_the_next_part() {
        let address = ResolvedAddress {
            house_number: some("7"),
            locality: some("Delft"),
            ..ResolvedAddress::default()
        };

        assert_eq!(address.to_display_text(), "Address: \n7 Delft\n");
    }

    #[test]
    fn empty_address_only_has_the_heading() {
        assert_eq!(ResolvedAddress::default().to_display_text(), "Address: \n");
    }
}
