#[cfg(test)]
mod tests {
    use county_reconciler::FipsCode;

    #[test]
    fn test_normalization_pads_to_five_digits() {
        assert_eq!(FipsCode::new("1001").unwrap().as_str(), "01001");
        assert_eq!(FipsCode::new("1").unwrap().as_str(), "00001");
        assert_eq!(FipsCode::new("56045").unwrap().as_str(), "56045");
        assert_eq!(FipsCode::from_numeric(8014).unwrap().as_str(), "08014");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = FipsCode::new("1001").unwrap();
        let twice = FipsCode::new(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalization_trims_whitespace() {
        assert_eq!(FipsCode::new(" 1001 ").unwrap().as_str(), "01001");
    }

    #[test]
    fn test_malformed_identifiers_rejected() {
        assert!(FipsCode::new("").is_err());
        assert!(FipsCode::new("abc").is_err());
        assert!(FipsCode::new("-3").is_err());
        assert!(FipsCode::new("1001.0").is_err());
        assert!(FipsCode::new("123456").is_err());
        assert!(FipsCode::from_numeric(100_000).is_err());
    }

    #[test]
    fn test_display_matches_normalized_form() {
        let code = FipsCode::new("1001").unwrap();
        assert_eq!(code.to_string(), "01001");
    }
}
