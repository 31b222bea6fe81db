#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use county_reconciler::FipsFilter;
    use county_reconciler::registry::factory::{register_from_name, register_from_path};
    use county_reconciler::registry::{RegisterLoader, hpsa, rucc};
    use county_reconciler::utils::test::{hpsa_batch, temp_path};
    use parquet::arrow::ArrowWriter;
    use std::path::Path;

    #[test]
    fn test_factory_resolves_register_names() {
        assert_eq!(register_from_name("rucc").unwrap().register_name(), "RUCC");
        assert_eq!(register_from_name("HPSA").unwrap().register_name(), "HPSA");
        assert_eq!(register_from_name("pqi").unwrap().register_name(), "PQI");
        assert!(register_from_name("unknown").is_err());
    }

    #[test]
    fn test_factory_infers_register_from_path() {
        let rucc = register_from_path(Path::new("data/rural_urban_codes.csv")).unwrap();
        assert_eq!(rucc.register_name(), "RUCC");

        let hpsa = register_from_path(Path::new("data/hpsa_scores.parquet")).unwrap();
        assert_eq!(hpsa.register_name(), "HPSA");

        let pqi = register_from_path(Path::new("data/prevent_hosp_2019.csv")).unwrap();
        assert_eq!(pqi.register_name(), "PQI");

        assert!(register_from_path(Path::new("data/other.csv")).is_err());
    }

    #[test]
    fn test_csv_load_handles_alternate_headers_and_key_widths() {
        let path = temp_path("registry_rucc.csv");
        fs::write(
            &path,
            "FIPS,County_Name,State,rucc_code\n\
             1001,Autauga,AL,2\n\
             01003,Baldwin,AL,3\n\
             8014,Broomfield,CO,1\n",
        )
        .unwrap();

        let register = rucc::RuccRegister::new();
        let batches = register.load(&path, None).unwrap();
        let rows = rucc::conversion::batches_to_rows(&batches).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fips, "1001");
        assert_eq!(rows[0].county.as_deref(), Some("Autauga"));
        assert_eq!(rows[0].state.as_deref(), Some("AL"));
        assert_eq!(rows[0].rural_urban, Some(2));
        assert_eq!(rows[1].fips, "01003");
        assert_eq!(rows[2].rural_urban, Some(1));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_csv_load_with_fips_filter() {
        let path = temp_path("registry_filtered.csv");
        fs::write(
            &path,
            "fips,county,state,rural_urban\n\
             1001,Autauga,AL,2\n\
             1003,Baldwin,AL,3\n",
        )
        .unwrap();

        // A padded filter value matches an unpadded source key.
        let filter = FipsFilter::new(["01001"], None).unwrap();
        assert_eq!(filter.len(), 1);
        let register = rucc::RuccRegister::new();
        let batches = register.load(&path, Some(&filter)).unwrap();
        let rows = rucc::conversion::batches_to_rows(&batches).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fips, "1001");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_parquet_load_round_trips_nulls() {
        let path = temp_path("registry_hpsa.parquet");
        let batch = hpsa_batch(&[("01001", Some(12.0)), ("01003", None), ("08014", Some(0.0))]);

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let register = hpsa::HpsaRegister::new();
        let batches = register.load(&path, None).unwrap();
        let rows = hpsa::conversion::batches_to_rows(&batches).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].hpsa_score, Some(12.0));
        assert_eq!(rows[1].hpsa_score, None);
        assert_eq!(rows[2].hpsa_score, Some(0.0));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_directory_load_combines_files() {
        let dir = temp_path("registry_dir");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("part1.csv"),
            "fips,hpsa_score\n1001,5.0\n",
        )
        .unwrap();
        fs::write(
            dir.join("part2.csv"),
            "fips,hpsa_score\n1003,7.5\n",
        )
        .unwrap();

        let register = hpsa::HpsaRegister::new();
        let batches = register.load(&dir, None).unwrap();
        let rows = hpsa::conversion::batches_to_rows(&batches).unwrap();

        assert_eq!(rows.len(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_source_path_is_an_error() {
        let register = hpsa::HpsaRegister::new();
        assert!(register.load(Path::new("does/not/exist.csv"), None).is_err());
    }
}
