#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::path::Path;

    use arrow::record_batch::RecordBatch;
    use county_reconciler::config::PipelineConfig;
    use county_reconciler::export::read_output;
    use county_reconciler::pipeline;
    use county_reconciler::utils::test::{pqi_batch, rucc_batch, temp_path};
    use parquet::arrow::ArrowWriter;

    fn write_parquet(path: &Path, batch: &RecordBatch) {
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
    }

    #[tokio::test]
    async fn test_full_run_produces_output_and_diagnostics() {
        let dir = temp_path("pipeline_run");
        fs::create_dir_all(&dir).unwrap();

        // Classification from Parquet, shortage from CSV, hospitalization
        // from Parquet, with one excluded state and one unmatched county.
        write_parquet(
            &dir.join("rucc.parquet"),
            &rucc_batch(&[
                ("01001", "Autauga", "AL", Some(2)),
                ("01003", "Baldwin", "AL", Some(3)),
                ("08014", "Broomfield", "CO", Some(1)),
                ("02013", "Aleutians East", "AK", Some(9)),
            ]),
        );
        fs::write(
            dir.join("hpsa.csv"),
            "fips,hpsa_score\n1001,12.0\n1003,0.0\n",
        )
        .unwrap();
        write_parquet(
            &dir.join("pqi.parquet"),
            &pqi_batch(&[("01001", Some(48.2)), ("01003", Some(39.9))]),
        );

        let config = PipelineConfig {
            rucc_path: dir.join("rucc.parquet"),
            hpsa_path: dir.join("hpsa.csv"),
            pqi_path: dir.join("pqi.parquet"),
            output_path: dir.join("counties.csv"),
            diagnostics_path: Some(dir.join("diagnostics.json")),
            ..PipelineConfig::default()
        };

        let outcome = pipeline::run(&config).await.unwrap();

        // The Alaska county is excluded, everything else survives the join.
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.report.excluded_rows, 1);
        assert_eq!(outcome.report.score_matches, 2);
        assert_eq!(outcome.metrics.zero_score_count, 1);
        assert_eq!(outcome.metrics.incomplete.len(), 1);
        assert_eq!(outcome.metrics.incomplete[0].fips.as_str(), "08014");

        // The exported file reloads into the same record set.
        let reloaded = read_output(&config.output_path).unwrap();
        assert_eq!(reloaded, outcome.records);

        // Diagnostics are valid JSON carrying both report and metrics.
        let diagnostics: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("diagnostics.json")).unwrap())
                .unwrap();
        assert!(diagnostics["generated_at"].is_string());
        assert_eq!(diagnostics["reconcile"]["classification_rows"], 4);
        assert_eq!(diagnostics["metrics"]["zero_score_count"], 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_run_with_county_subset_filter() {
        let dir = temp_path("pipeline_subset");
        fs::create_dir_all(&dir).unwrap();

        write_parquet(
            &dir.join("rucc.parquet"),
            &rucc_batch(&[
                ("01001", "Autauga", "AL", Some(2)),
                ("01003", "Baldwin", "AL", Some(3)),
            ]),
        );
        fs::write(dir.join("hpsa.csv"), "fips,hpsa_score\n1001,12.0\n").unwrap();
        fs::write(dir.join("pqi.csv"), "fips,hosp_rate\n1001,48.2\n").unwrap();

        let config = PipelineConfig {
            rucc_path: dir.join("rucc.parquet"),
            hpsa_path: dir.join("hpsa.csv"),
            pqi_path: dir.join("pqi.csv"),
            output_path: dir.join("counties.csv"),
            fips_filter: Some(vec!["1001".to_string()]),
            ..PipelineConfig::default()
        };

        let outcome = pipeline::run(&config).await.unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].fips.as_str(), "01001");

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_missing_source_fails_validation() {
        let config = PipelineConfig {
            rucc_path: temp_path("pipeline_missing/nope.csv"),
            ..PipelineConfig::default()
        };
        assert!(pipeline::run(&config).await.is_err());
    }
}
