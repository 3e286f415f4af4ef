//! CSV enrichment job: append state and nearest-coast columns to a city list.

use std::{io, path::Path};

use tracing::{debug, warn};

use crate::{
    geocode::ReverseGeocoder,
    nearest::{nearest_sea_coast, valid_coordinates},
};

pub const LAT_COLUMN: &str = "lat";
pub const LNG_COLUMN: &str = "lng";
pub const APPENDED_COLUMNS: [&str; 3] = ["State", "Nearest_Sea_Coast", "Distance_to_Sea_Coast_km"];

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("input has no '{column}' column")]
    MissingColumn { column: &'static str },
}

/// Row counts from one enrichment run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichReport {
    pub rows: usize,
    /// Rows for which a state was resolved.
    pub geocoded: usize,
    /// Rows whose geocoding call failed.
    pub geocode_failed: usize,
    /// Rows with unparseable coordinates.
    pub skipped: usize,
}

/// Read `input`, keep every column, append `State`, `Nearest_Sea_Coast` and
/// `Distance_to_Sea_Coast_km`, and write the result to `output`.
///
/// Rows are processed in order. A failed geocoding call leaves `State` empty
/// and moves on. Coordinates that do not parse leave all three columns empty.
pub async fn enrich_cities(
    input: &Path,
    output: &Path,
    geocoder: &dyn ReverseGeocoder,
) -> Result<EnrichReport, EnrichError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let lat_idx = column_index(&headers, LAT_COLUMN)?;
    let lng_idx = column_index(&headers, LNG_COLUMN)?;

    let mut writer = csv::Writer::from_path(output)?;
    let mut out_headers = headers.clone();
    for col in APPENDED_COLUMNS {
        out_headers.push_field(col);
    }
    writer.write_record(&out_headers)?;

    let mut report = EnrichReport::default();
    for record in reader.records() {
        let mut record = record?;
        report.rows += 1;

        let Some((lat, lng)) = parse_coords(record.get(lat_idx), record.get(lng_idx)) else {
            debug!(row = report.rows, "unparseable coordinates, leaving columns empty");
            report.skipped += 1;
            for _ in APPENDED_COLUMNS {
                record.push_field("");
            }
            writer.write_record(&record)?;
            continue;
        };

        let state = match geocoder.state_for(lat, lng).await {
            Ok(Some(state)) => {
                report.geocoded += 1;
                state
            },
            Ok(None) => String::new(),
            Err(e) => {
                warn!(lat, lng, error = %e, "error getting state for coordinates");
                report.geocode_failed += 1;
                String::new()
            },
        };

        record.push_field(&state);
        match nearest_sea_coast(lat, lng) {
            Some(nearest) => {
                record.push_field(nearest.name);
                record.push_field(&nearest.distance_km.to_string());
            },
            None => {
                record.push_field("");
                record.push_field("");
            },
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(report)
}

fn column_index(headers: &csv::StringRecord, column: &'static str) -> Result<usize, EnrichError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or(EnrichError::MissingColumn { column })
}

fn parse_coords(lat: Option<&str>, lng: Option<&str>) -> Option<(f64, f64)> {
    let lat: f64 = lat?.trim().parse().ok()?;
    let lng: f64 = lng?.trim().parse().ok()?;
    valid_coordinates(lat, lng).then_some((lat, lng))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, async_trait::async_trait, std::path::PathBuf, tempfile::TempDir};

    /// Answers by latitude band; fails above 25 N.
    struct BandGeocoder;

    #[async_trait]
    impl ReverseGeocoder for BandGeocoder {
        async fn state_for(&self, lat: f64, _lon: f64) -> anyhow::Result<Option<String>> {
            match lat {
                l if l > 25.0 => anyhow::bail!("quota exceeded"),
                l if l > 18.0 => Ok(Some("Maharashtra".into())),
                l if l > 9.0 => Ok(Some("Kerala".into())),
                _ => Ok(None),
            }
        }
    }

    fn write_input(tmp: &TempDir, content: &str) -> (PathBuf, PathBuf) {
        let input = tmp.path().join("Cities.csv");
        std::fs::write(&input, content).unwrap();
        (input, tmp.path().join("out.csv"))
    }

    fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut r = csv::Reader::from_path(path).unwrap();
        let headers = r.headers().unwrap().clone();
        let rows = r.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[tokio::test]
    async fn appends_columns_and_keeps_input() {
        let tmp = TempDir::new().unwrap();
        let (input, output) = write_input(
            &tmp,
            "city,lat,lng,population\nMumbai,19.0760,72.8777,12442373\nKochi,9.9312,76.2673,602046\n",
        );

        let report = enrich_cities(&input, &output, &BandGeocoder).await.unwrap();
        assert_eq!(report, EnrichReport {
            rows: 2,
            geocoded: 2,
            geocode_failed: 0,
            skipped: 0,
        });

        let (headers, rows) = read_rows(&output);
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "city",
                "lat",
                "lng",
                "population",
                "State",
                "Nearest_Sea_Coast",
                "Distance_to_Sea_Coast_km"
            ]
        );
        assert_eq!(&rows[0][0], "Mumbai");
        assert_eq!(&rows[0][3], "12442373");
        assert_eq!(&rows[0][4], "Maharashtra");
        assert_eq!(&rows[0][5], "Mumbai Coast (Maharashtra)");
        let km: f64 = rows[0][6].parse().unwrap();
        assert!(km > 0.0 && km < 20.0, "{km}");

        assert_eq!(&rows[1][4], "Kerala");
        assert_eq!(&rows[1][5], "Kochi Coast (Kerala)");
        let km: f64 = rows[1][6].parse().unwrap();
        assert!(km < 1e-6);
    }

    #[tokio::test]
    async fn geocoding_failure_does_not_abort() {
        let tmp = TempDir::new().unwrap();
        let (input, output) = write_input(
            &tmp,
            "city,lat,lng\nDelhi,28.6139,77.2090\nTuticorin,8.7642,78.1348\n",
        );

        let report = enrich_cities(&input, &output, &BandGeocoder).await.unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.geocode_failed, 1);
        assert_eq!(report.geocoded, 0);

        let (_, rows) = read_rows(&output);
        assert_eq!(&rows[0][3], "");
        assert!(!rows[0][4].is_empty());
        assert!(!rows[0][5].is_empty());
        assert_eq!(&rows[1][3], "");
        assert_eq!(&rows[1][4], "Tuticorin Coast (Tamil Nadu)");
    }

    #[tokio::test]
    async fn bad_coordinates_leave_columns_empty() {
        let tmp = TempDir::new().unwrap();
        let (input, output) = write_input(&tmp, "city,lat,lng\nNowhere,,abc\n");

        let report = enrich_cities(&input, &output, &BandGeocoder).await.unwrap();
        assert_eq!(report.skipped, 1);

        let (_, rows) = read_rows(&output);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[0][5], "");
    }

    #[tokio::test]
    async fn out_of_range_latitude_is_skipped_without_geocoding() {
        let tmp = TempDir::new().unwrap();
        let (input, output) = write_input(
            &tmp,
            "city,lat,lng\nTypo,200.0,76.0\nKochi,9.9312,76.2673\n",
        );

        let report = enrich_cities(&input, &output, &BandGeocoder).await.unwrap();
        assert_eq!(report, EnrichReport {
            rows: 2,
            geocoded: 1,
            geocode_failed: 0,
            skipped: 1,
        });

        let (_, rows) = read_rows(&output);
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[0][5], "");
        assert_eq!(&rows[1][4], "Kochi Coast (Kerala)");
    }

    #[tokio::test]
    async fn missing_column_is_error() {
        let tmp = TempDir::new().unwrap();
        let (input, output) = write_input(&tmp, "city,latitude,lng\nKochi,9.9,76.2\n");

        let err = enrich_cities(&input, &output, &BandGeocoder)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrichError::MissingColumn { column: "lat" }));
    }

    #[tokio::test]
    async fn missing_input_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = enrich_cities(
            &tmp.path().join("absent.csv"),
            &tmp.path().join("out.csv"),
            &BandGeocoder,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EnrichError::Csv(_)));
    }
}
