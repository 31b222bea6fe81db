#[cfg(test)]
mod tests {
    use county_reconciler::models::{CountyRecord, FipsCode};
    use county_reconciler::{AdjustmentFactor, adjusted_rate, adjusted_score};

    fn record(score: Option<f64>, rate: Option<f64>) -> CountyRecord {
        CountyRecord {
            fips: FipsCode::new("1001").unwrap(),
            county: "Autauga".to_string(),
            state: "AL".to_string(),
            rural_urban: Some(2),
            hpsa_score: score,
            hosp_rate: rate,
        }
    }

    #[test]
    fn test_factor_validates_range() {
        assert!(AdjustmentFactor::new(0.0).is_ok());
        assert!(AdjustmentFactor::new(0.25).is_ok());
        assert!(AdjustmentFactor::new(0.5).is_ok());

        assert!(AdjustmentFactor::new(-0.1).is_err());
        assert!(AdjustmentFactor::new(0.6).is_err());
        assert!(AdjustmentFactor::new(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_factor_is_identity() {
        let factor = AdjustmentFactor::new(0.0).unwrap();
        let subject = record(Some(14.0), Some(52.5));

        assert_eq!(adjusted_score(&subject, factor), Some(14.0));
        assert_eq!(adjusted_rate(&subject, factor), Some(52.5));
    }

    #[test]
    fn test_half_factor_halves_exactly() {
        let factor = AdjustmentFactor::new(0.5).unwrap();
        let subject = record(Some(14.0), Some(52.5));

        assert_eq!(adjusted_score(&subject, factor), Some(7.0));
        assert_eq!(adjusted_rate(&subject, factor), Some(26.25));
    }

    #[test]
    fn test_absent_values_stay_absent() {
        let subject = record(None, None);
        for r in [0.0, 0.25, 0.5] {
            let factor = AdjustmentFactor::new(r).unwrap();
            assert_eq!(adjusted_score(&subject, factor), None);
            assert_eq!(adjusted_rate(&subject, factor), None);
        }
    }
}
