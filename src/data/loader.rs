use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{GameRecord, GameTable, parse_flag};
use crate::error::DashboardError;

/// Columns every source file must provide. Metric columns are optional.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "game_id",
    "season",
    "posteam",
    "home_team",
    "away_team",
    "is_international",
    "is_thursday",
    "home_score",
    "away_score",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a game table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the nflverse export)
/// * `.json`    – `[{ "game_id": ..., "season": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names as the CSV header
///
/// Rows without a `posteam` are dropped. Any failure is reported as
/// [`DashboardError::DataUnavailable`].
pub fn load_file(path: &Path) -> Result<GameTable, DashboardError> {
    read_records(path)
        .map(|records| GameTable::from_records(drop_teamless(records)))
        .map_err(|source| DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

fn read_records(path: &Path) -> Result<Vec<GameRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn drop_teamless(records: Vec<GameRecord>) -> Vec<GameRecord> {
    let total = records.len();
    let kept: Vec<GameRecord> = records.into_iter().filter(|r| r.posteam.is_some()).collect();
    if kept.len() < total {
        log::warn!("Dropped {} rows without a posteam", total - kept.len());
    }
    kept
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = present.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if !missing.is_empty() {
        bail!("missing required columns: {}", missing.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<GameRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    reader
        .deserialize::<GameRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "game_id": "2019_01_KC_JAX", "season": 2019, "posteam": "KC", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<GameRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: serde_json::Value = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            check_columns(obj.keys().map(String::as_str)).with_context(|| format!("Row {i}"))?;
            serde_json::from_value(rec.clone()).with_context(|| format!("Row {i}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): large, view and dictionary-encoded
/// string columns are cast to plain Utf8, integer and float widths are coerced.
fn load_parquet(path: &Path) -> Result<Vec<GameRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = normalize_strings(batch_result.context("reading parquet record batch")?)?;
        let schema = batch.schema();
        check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

        for row in 0..batch.num_rows() {
            let record = record_from_batch(&batch, row)
                .with_context(|| format!("Row {}", offset + row))?;
            records.push(record);
        }
        offset += batch.num_rows();
    }

    Ok(records)
}

fn record_from_batch(batch: &RecordBatch, row: usize) -> Result<GameRecord> {
    let col = |name: &str| batch.column_by_name(name);
    let required = |name: &str| col(name).with_context(|| format!("missing '{name}' column"));

    let season = cell_f64(required("season")?, row)?.context("null season")?;

    Ok(GameRecord {
        game_id: cell_string(required("game_id")?, row)?.context("null game_id")?,
        season: season as i64,
        posteam: cell_string(required("posteam")?, row)?.filter(|s| !s.is_empty()),
        home_team: cell_string(required("home_team")?, row)?.context("null home_team")?,
        away_team: cell_string(required("away_team")?, row)?.context("null away_team")?,
        is_international: cell_flag(required("is_international")?, row)?,
        is_thursday: cell_flag(required("is_thursday")?, row)?,
        home_score: cell_f64(required("home_score")?, row)?.context("null home_score")?,
        away_score: cell_f64(required("away_score")?, row)?.context("null away_score")?,
        pass_attempts: col("pass_attempts").map(|c| cell_f64(c, row)).transpose()?.flatten(),
        passing_yards: col("passing_yards").map(|c| cell_f64(c, row)).transpose()?.flatten(),
        rushing_yards: col("rushing_yards").map(|c| cell_f64(c, row)).transpose()?.flatten(),
        is_away: 0,
        points_scored: 0.0,
        is_away_game: false,
    })
}

// -- Parquet / Arrow helpers --

/// Cast every string-like column (LargeUtf8, Utf8View, dictionary of strings)
/// to plain Utf8 so the cell readers only deal with `StringArray`.
fn normalize_strings(batch: RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    if !schema.fields().iter().any(|f| is_string_like(f.data_type())) {
        return Ok(batch);
    }

    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for (field, col) in schema.fields().iter().zip(batch.columns()) {
        if is_string_like(field.data_type()) {
            let casted = cast(col, &DataType::Utf8)
                .with_context(|| format!("casting '{}' to Utf8", field.name()))?;
            columns.push(casted);
            fields.push(Field::new(field.name(), DataType::Utf8, field.is_nullable()));
        } else {
            columns.push(col.clone());
            fields.push(field.as_ref().clone());
        }
    }
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("rebuilding record batch")
}

fn is_string_like(data_type: &DataType) -> bool {
    match data_type {
        DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, value) => matches!(
            value.as_ref(),
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
        ),
        _ => false,
    }
}

/// Read a numeric cell as `f64`. Null → `None`.
fn cell_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Boolean => f64::from(u8::from(downcast::<BooleanArray>(col)?.value(row))),
        DataType::Utf8 => {
            let s = string_value(col, row)?;
            s.trim()
                .parse::<f64>()
                .with_context(|| format!("'{s}' is not a number"))?
        }
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(if value.is_nan() { None } else { Some(value) })
}

/// Read a text cell. Integer columns (e.g. numeric game ids) are stringified.
fn cell_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(string_value(col, row)?)),
        DataType::Int32 | DataType::Int64 => Ok(cell_f64(col, row)?.map(|v| (v as i64).to_string())),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn cell_flag(col: &Arc<dyn Array>, row: usize) -> Result<bool> {
    if col.is_null(row) {
        return Ok(false);
    }
    match col.data_type() {
        DataType::Boolean => Ok(downcast::<BooleanArray>(col)?.value(row)),
        DataType::Utf8 => {
            let s = string_value(col, row)?;
            parse_flag(&s).with_context(|| format!("'{s}' is not a 0/1 flag"))
        }
        _ => Ok(cell_f64(col, row)?.is_some_and(|v| v != 0.0)),
    }
}

fn string_value(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    Ok(downcast::<StringArray>(col)?.value(row).to_string())
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", col.data_type()))
}
