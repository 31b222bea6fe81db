#[cfg(test)]
mod tests {
    use std::fs;

    use county_reconciler::export::{read_output, write_output};
    use county_reconciler::models::{CountyRecord, FipsCode};
    use county_reconciler::utils::test::temp_path;

    fn sample_records() -> Vec<CountyRecord> {
        vec![
            CountyRecord {
                fips: FipsCode::new("1001").unwrap(),
                county: "Autauga".to_string(),
                state: "AL".to_string(),
                rural_urban: Some(2),
                hpsa_score: Some(10.0),
                hosp_rate: Some(48.2),
            },
            CountyRecord {
                fips: FipsCode::new("1003").unwrap(),
                county: "Baldwin".to_string(),
                state: "AL".to_string(),
                rural_urban: Some(3),
                hpsa_score: Some(0.0),
                hosp_rate: None,
            },
            CountyRecord {
                fips: FipsCode::new("8014").unwrap(),
                county: "Broomfield".to_string(),
                state: "CO".to_string(),
                rural_urban: None,
                hpsa_score: None,
                hosp_rate: Some(31.5),
            },
        ]
    }

    #[test]
    fn test_header_has_fixed_column_order() {
        let path = temp_path("export_header.csv");
        write_output(&sample_records(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "fips,county,state,Rural_Urban,hpsa_score,hosp_rate");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_absent_serializes_as_empty_and_zero_as_zero() {
        let path = temp_path("export_absence.csv");
        write_output(&sample_records(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        // Baldwin: zero score present, rate absent.
        let baldwin: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(baldwin[0], "01003");
        assert!(!baldwin[4].is_empty(), "zero score must not serialize empty");
        assert!(baldwin[5].is_empty(), "absent rate must serialize empty");

        // Broomfield: classification and score absent.
        let broomfield: Vec<&str> = lines[3].split(',').collect();
        assert!(broomfield[3].is_empty());
        assert!(broomfield[4].is_empty());
        assert!(!broomfield[5].is_empty());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let path = temp_path("export_round_trip.csv");
        let records = sample_records();

        write_output(&records, &path).unwrap();
        let reloaded = read_output(&path).unwrap();
        assert_eq!(reloaded, records);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_round_trip_keeps_leading_zeros() {
        let path = temp_path("export_zeros.csv");
        write_output(&sample_records(), &path).unwrap();

        let reloaded = read_output(&path).unwrap();
        assert_eq!(reloaded[0].fips.as_str(), "01001");
        assert_eq!(reloaded[2].fips.as_str(), "08014");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_record_set_round_trips() {
        let path = temp_path("export_empty.csv");
        write_output(&[], &path).unwrap();

        let reloaded = read_output(&path).unwrap();
        assert!(reloaded.is_empty());

        fs::remove_file(&path).ok();
    }
}
