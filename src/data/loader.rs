use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record, REQUIRED_COLUMNS};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a phone dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "brand_name": "...", "model": "...", ... }, ...]`
/// * `.parquet` – one column per attribute, nullable
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => read_csv(open(path)?)?,
        "json" => read_json(open(path)?)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!("Loaded {} phones from {}", records.len(), path.display());
    Ok(Dataset::new(records).with_source(path))
}

/// Write the dataset back out as CSV with the same header the loader reads.
pub fn export_csv(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for record in dataset.records() {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    log::info!("Exported {} phones to {}", dataset.len(), path.display());
    Ok(())
}

fn open(path: &Path) -> Result<std::fs::File, DataLoadError> {
    std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), DataLoadError> {
    let present: Vec<&str> = present.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataLoadError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Cell – one raw value before typing
// ---------------------------------------------------------------------------

/// A source value as the file format delivered it.
#[derive(Debug, Clone, PartialEq)]
enum Cell<'a> {
    Missing,
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A value of a type no column accepts (nested JSON, exotic Arrow types).
    Other(String),
}

static MISSING: Cell<'static> = Cell::Missing;

const MISSING_TOKENS: [&str; 5] = ["nan", "n/a", "na", "null", "none"];

impl<'a> Cell<'a> {
    /// Text cell; empty strings and pandas-style NA markers become `Missing`.
    fn text(s: &'a str) -> Self {
        let s = s.trim();
        if s.is_empty() || MISSING_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
            Cell::Missing
        } else {
            Cell::Text(s)
        }
    }

    fn as_int(&self) -> Option<Option<i64>> {
        match self {
            Cell::Missing => Some(None),
            Cell::Int(i) => Some(Some(*i)),
            Cell::Float(f) if f.is_nan() => Some(None),
            Cell::Float(f) => whole(*f).map(Some),
            Cell::Text(s) => s
                .parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
                .map(Some),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<Option<f64>> {
        match self {
            Cell::Missing => Some(None),
            Cell::Int(i) => Some(Some(*i as f64)),
            Cell::Float(f) if f.is_nan() => Some(None),
            Cell::Float(f) => f.is_finite().then_some(Some(*f)),
            Cell::Text(s) => s.parse::<f64>().ok().filter(|f| f.is_finite()).map(Some),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<Option<bool>> {
        match self {
            Cell::Missing => Some(None),
            Cell::Bool(b) => Some(Some(*b)),
            Cell::Int(0) => Some(Some(false)),
            Cell::Int(1) => Some(Some(true)),
            Cell::Float(f) if f.is_nan() => Some(None),
            Cell::Float(f) if *f == 0.0 => Some(Some(false)),
            Cell::Float(f) if *f == 1.0 => Some(Some(true)),
            Cell::Text(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "1.0" => Some(Some(true)),
                "false" | "0" | "0.0" => Some(Some(false)),
                _ => None,
            },
            _ => None,
        }
    }

    fn as_text(&self) -> Option<Option<String>> {
        match self {
            Cell::Missing => Some(None),
            Cell::Text(s) => Some(Some(s.to_string())),
            Cell::Int(i) => Some(Some(i.to_string())),
            Cell::Float(f) if f.is_nan() => Some(None),
            Cell::Float(f) => Some(Some(f.to_string())),
            Cell::Bool(b) => Some(Some(b.to_string())),
            Cell::Other(_) => None,
        }
    }
}

/// `f` as an integer when it is whole and fits in `i64`.
fn whole(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (in_range && f.fract() == 0.0).then_some(f as i64)
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – the required cells of one source row, in REQUIRED_COLUMNS order
// ---------------------------------------------------------------------------

struct Row<'a> {
    index: usize,
    cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    /// Gather the required cells using a per-format lookup.
    fn collect(index: usize, lookup: impl Fn(&str) -> Cell<'a>) -> Self {
        Row {
            index,
            cells: REQUIRED_COLUMNS.iter().map(|&col| lookup(col)).collect(),
        }
    }

    fn cell(&self, column: &str) -> &Cell<'a> {
        REQUIRED_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&MISSING)
    }

    fn decode<T>(
        &self,
        column: &str,
        typed: impl Fn(&Cell<'a>) -> Option<Option<T>>,
    ) -> Result<Option<T>, DataLoadError> {
        let cell = self.cell(column);
        typed(cell).ok_or_else(|| DataLoadError::InvalidCell {
            row: self.index,
            column: column.to_string(),
            value: cell.to_string(),
        })
    }

    fn int(&self, column: &str) -> Result<Option<i64>, DataLoadError> {
        self.decode(column, Cell::as_int)
    }

    fn float(&self, column: &str) -> Result<Option<f64>, DataLoadError> {
        self.decode(column, Cell::as_float)
    }

    fn flag(&self, column: &str) -> Result<Option<bool>, DataLoadError> {
        self.decode(column, Cell::as_bool)
    }

    fn text(&self, column: &str) -> Result<Option<String>, DataLoadError> {
        self.decode(column, Cell::as_text)
    }

    /// Identifying columns must be present.
    fn ident(&self, column: &str) -> Result<String, DataLoadError> {
        self.text(column)?.ok_or_else(|| DataLoadError::InvalidCell {
            row: self.index,
            column: column.to_string(),
            value: String::new(),
        })
    }

    fn into_record(self) -> Result<Record, DataLoadError> {
        Ok(Record {
            brand_name: self.ident("brand_name")?,
            model: self.ident("model")?,
            price: self.int("price")?,
            rating: self.float("rating")?,
            has_5g: self.flag("has_5g")?,
            has_nfc: self.flag("has_nfc")?,
            has_ir_blaster: self.flag("has_ir_blaster")?,
            processor_speed: self.float("processor_speed")?,
            battery_capacity: self.int("battery_capacity")?,
            fast_charging: self.float("fast_charging")?,
            ram_capacity: self.int("ram_capacity")?,
            storage_capacity: self.int("storage_capacity")?,
            display_size: self.float("display_size")?,
            refresh_rate: self.int("refresh_rate")?,
            max_rear_camera_mp: self.float("max_rear_camera_MP")?,
            max_front_camera_mp: self.float("max_front_camera_MP")?,
            card_supported: self.flag("card_supported")?,
            os: self.text("os")?,
            sim_type: self.text("sim_type")?,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one phone per row.
/// Extra columns are ignored.
fn read_csv<R: Read>(input: R) -> Result<Vec<Record>, DataLoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_columns(headers.iter().map(String::as_str))?;

    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let raw = result?;
        let row = Row::collect(row_no, |col| {
            index
                .get(col)
                .and_then(|&i| raw.get(i))
                .map_or(Cell::Missing, Cell::text)
        });
        records.push(row.into_record()?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "brand_name": "samsung", "model": "Galaxy S23", "price": 74999, ... },
///   ...
/// ]
/// ```
///
/// The first object defines the schema; later objects may omit keys,
/// which reads as missing values.
fn read_json<R: Read>(input: R) -> Result<Vec<Record>, DataLoadError> {
    let root: JsonValue = serde_json::from_reader(input)?;
    let objects = match &root {
        JsonValue::Array(items) => items,
        other => {
            return Err(DataLoadError::InvalidCell {
                row: 0,
                column: "<root>".to_string(),
                value: json_kind(other).to_string(),
            })
        }
    };

    if objects.is_empty() {
        check_columns([])?;
    }

    let mut records = Vec::with_capacity(objects.len());
    for (row_no, item) in objects.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            return Err(DataLoadError::InvalidCell {
                row: row_no,
                column: "<row>".to_string(),
                value: json_kind(item).to_string(),
            });
        };
        if row_no == 0 {
            check_columns(obj.keys().map(String::as_str))?;
        }
        let row = Row::collect(row_no, |col| obj.get(col).map_or(Cell::Missing, json_cell));
        records.push(row.into_record()?);
    }
    Ok(records)
}

fn json_cell(val: &JsonValue) -> Cell<'_> {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map_or_else(|| Cell::Other(n.to_string()), Cell::Float),
        },
        JsonValue::String(s) => Cell::text(s),
        other => Cell::Other(other.to_string()),
    }
}

fn json_kind(val: &JsonValue) -> &'static str {
    match val {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one nullable column per attribute.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<Record>, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let columns: HashMap<&str, &dyn Array> = REQUIRED_COLUMNS
            .iter()
            .filter_map(|col| {
                let idx = schema.index_of(col).ok()?;
                Some((*col, batch.column(idx).as_ref()))
            })
            .collect();

        for row_in_batch in 0..batch.num_rows() {
            let row = Row::collect(records.len(), |col| {
                columns
                    .get(col)
                    .map_or(Cell::Missing, |arr| arrow_cell(*arr, row_in_batch))
            });
            records.push(row.into_record()?);
        }
    }
    Ok(records)
}

/// Extract a single value from an Arrow column at a given row.
fn arrow_cell(col: &dyn Array, row: usize) -> Cell<'_> {
    if col.is_null(row) {
        return Cell::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::text(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Cell::text(col.as_string::<i64>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        DataType::Int32 => Cell::Int(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Int(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        other => Cell::Other(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use std::sync::Arc;

    use arrow::array::{
        ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, LargeStringArray,
        ListArray, StringArray,
    };
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::NumericAttr;

    const HEADER: &str = "brand_name,model,price,rating,has_5g,has_nfc,has_ir_blaster,\
processor_speed,battery_capacity,fast_charging,ram_capacity,storage_capacity,display_size,\
refresh_rate,max_rear_camera_MP,max_front_camera_MP,card_supported,os,sim_type";

    fn csv_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        writeln!(file, "{HEADER}").expect("write header");
        write!(file, "{body}").expect("write body");
        file
    }

    #[test]
    fn loads_pandas_style_csv() {
        let file = csv_file(
            "oneplus,OnePlus 11 5G,54999,89.0,True,True,False,3.2,5000,100.0,12.0,256,6.7,120,50.0,16.0,False,android,dual\n\
             apple,iPhone 14,65999,,True,True,False,3.22,3279,,6,128,6.1,60,12.0,12.0,False,ios,\n",
        );
        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 2);

        let op = &ds.records()[0];
        assert_eq!(op.ram_capacity, Some(12));
        assert_eq!(op.has_5g, Some(true));
        assert_eq!(op.card_supported, Some(false));
        assert_eq!(op.os.as_deref(), Some("android"));

        let apple = &ds.records()[1];
        assert_eq!(apple.rating, None);
        assert_eq!(apple.numeric(NumericAttr::FastCharging), None);
        assert_eq!(apple.sim_type, None);
        assert_eq!(ds.source(), Some(file.path()));
    }

    #[test]
    fn nan_tokens_read_as_missing() {
        let file = csv_file(
            "acme,A1,NaN,nan,,N/A,null,,,,,,,,,,,,\n",
        );
        let ds = load_file(file.path()).expect("load");
        let r = &ds.records()[0];
        assert_eq!(r.price, None);
        assert_eq!(r.rating, None);
        assert_eq!(r.has_5g, None);
        assert_eq!(r.has_nfc, None);
        assert_eq!(r.has_ir_blaster, None);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "brand_name,model,price").unwrap();
        writeln!(file, "acme,A1,100").unwrap();

        match load_file(file.path()) {
            Err(DataLoadError::MissingColumns(cols)) => {
                assert!(cols.contains(&"rating".to_string()));
                assert!(cols.contains(&"sim_type".to_string()));
                assert!(!cols.contains(&"price".to_string()));
                assert_eq!(cols.len(), REQUIRED_COLUMNS.len() - 3);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_cell_names_row_and_column() {
        let file = csv_file(
            "acme,A1,100,80,True,False,False,2.0,4000,,4,64,6.5,60,48,8,True,android,dual\n\
             acme,A2,cheap,80,True,False,False,2.0,4000,,4,64,6.5,60,48,8,True,android,dual\n",
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidCell { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "price");
                assert_eq!(value, "cheap");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn fractional_integer_cell_is_rejected() {
        let file = csv_file(
            "acme,A1,100,80,True,False,False,2.0,4000,,4.5,64,6.5,60,48,8,True,android,dual\n",
        );
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::InvalidCell { ref column, .. }) if column == "ram_capacity"
        ));
    }

    #[test]
    fn missing_model_is_an_error() {
        let file = csv_file("acme,,100,,,,,,,,,,,,,,,,\n");
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::InvalidCell { ref column, .. }) if column == "model"
        ));
    }

    #[test]
    fn unreadable_source_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("phones.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedExtension(ref e) if e == "xlsx"));
    }

    #[test]
    fn json_records_load_with_typed_values() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[
              {{"brand_name":"acme","model":"A1","price":12000,"rating":null,"has_5g":true,
                "has_nfc":0,"has_ir_blaster":false,"processor_speed":2.2,"battery_capacity":5000,
                "fast_charging":null,"ram_capacity":4.0,"storage_capacity":64,"display_size":6.5,
                "refresh_rate":90,"max_rear_camera_MP":50,"max_front_camera_MP":8.0,
                "card_supported":true,"os":"android","sim_type":"dual"}},
              {{"brand_name":"zen","model":"Z1"}}
            ]"#
        )
        .unwrap();

        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 2);
        let a = &ds.records()[0];
        assert_eq!(a.ram_capacity, Some(4));
        assert_eq!(a.has_nfc, Some(false));
        assert_eq!(a.max_rear_camera_mp, Some(50.0));
        assert_eq!(ds.records()[1].price, None);
    }

    #[test]
    fn exported_csv_reloads_identically() {
        let mut phone = Record::new("acme", "A1");
        phone.price = Some(12000);
        phone.rating = Some(81.5);
        phone.has_5g = Some(true);
        phone.os = Some("android".to_string());
        let ds = Dataset::new(vec![phone, Record::new("zen", "Z1")]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        export_csv(&ds, &path).expect("export");

        let reloaded = load_file(&path).expect("reload");
        assert_eq!(reloaded.records(), ds.records());
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        let file = csv_file(
            "acme,A1,1e20,80,True,False,False,2.0,4000,,4,64,6.5,60,48,8,True,android,dual\n",
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidCell { column, value, .. }) => {
                assert_eq!(column, "price");
                assert_eq!(value, "1e20");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn empty_json_array_still_checks_columns() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[]").unwrap();
        match load_file(file.path()) {
            Err(DataLoadError::MissingColumns(cols)) => {
                assert_eq!(cols.len(), REQUIRED_COLUMNS.len());
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    // -- Parquet ------------------------------------------------------------

    /// Two phones, one typed column per attribute. Narrow and large Arrow
    /// types are mixed in to exercise widening.
    fn parquet_columns() -> Vec<(&'static str, ArrayRef)> {
        let text = |a: &'static str, b: &'static str| -> ArrayRef {
            Arc::new(StringArray::from(vec![Some(a), Some(b)]))
        };
        let ints = |a: Option<i32>, b: Option<i32>| -> ArrayRef {
            Arc::new(Int32Array::from(vec![a, b]))
        };
        let floats = |a: Option<f64>, b: Option<f64>| -> ArrayRef {
            Arc::new(Float64Array::from(vec![a, b]))
        };
        let flags = |a: Option<bool>, b: Option<bool>| -> ArrayRef {
            Arc::new(BooleanArray::from(vec![a, b]))
        };
        vec![
            ("brand_name", text("acme", "zen")),
            ("model", Arc::new(LargeStringArray::from(vec!["A1", "Z1"])) as ArrayRef),
            ("price", ints(Some(100), Some(25000))),
            ("rating", floats(Some(f64::NAN), Some(82.0))),
            ("has_5g", flags(Some(true), None)),
            ("has_nfc", flags(Some(false), Some(true))),
            ("has_ir_blaster", flags(None, Some(false))),
            ("processor_speed", Arc::new(Float32Array::from(vec![Some(2.5f32), None])) as ArrayRef),
            ("battery_capacity", ints(Some(5000), Some(4500))),
            ("fast_charging", floats(None, Some(33.0))),
            ("ram_capacity", ints(Some(4), Some(8))),
            (
                "storage_capacity",
                Arc::new(Float32Array::from(vec![Some(128.0f32), Some(256.0)])) as ArrayRef,
            ),
            ("display_size", floats(Some(6.5), Some(6.7))),
            ("refresh_rate", ints(Some(60), Some(120))),
            ("max_rear_camera_MP", floats(Some(48.0), Some(50.0))),
            ("max_front_camera_MP", floats(Some(8.0), None)),
            ("card_supported", flags(Some(true), Some(false))),
            ("os", text("android", "android")),
            ("sim_type", Arc::new(StringArray::from(vec![Some("dual"), None])) as ArrayRef),
        ]
    }

    fn parquet_file(columns: Vec<(&'static str, ArrayRef)>) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(
            columns
                .iter()
                .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
                .collect::<Vec<_>>(),
        ));
        let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, array)| array).collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).expect("batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("temp file");
        let mut writer = ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None)
            .expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close");
        file
    }

    #[test]
    fn parquet_columns_decode_and_widen() {
        let file = parquet_file(parquet_columns());
        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 2);

        let a = &ds.records()[0];
        assert_eq!(a.model, "A1");
        assert_eq!(a.price, Some(100));
        assert_eq!(a.rating, None);
        assert_eq!(a.has_5g, Some(true));
        assert_eq!(a.has_ir_blaster, None);
        assert_eq!(a.processor_speed, Some(2.5));
        assert_eq!(a.storage_capacity, Some(128));
        assert_eq!(a.fast_charging, None);

        let z = &ds.records()[1];
        assert_eq!(z.price, Some(25000));
        assert_eq!(z.rating, Some(82.0));
        assert_eq!(z.has_5g, None);
        assert_eq!(z.sim_type, None);
        assert_eq!(z.numeric(NumericAttr::RefreshRate), Some(120.0));
    }

    #[test]
    fn parquet_missing_column_is_reported() {
        let columns = parquet_columns()
            .into_iter()
            .filter(|(name, _)| *name != "rating")
            .collect();
        let file = parquet_file(columns);
        match load_file(file.path()) {
            Err(DataLoadError::MissingColumns(cols)) => assert_eq!(cols, vec!["rating"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn parquet_unsupported_type_is_invalid_cell() {
        let mut columns = parquet_columns();
        let nested = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(1)]),
            Some(vec![Some(2)]),
        ]);
        columns[2] = ("price", Arc::new(nested) as ArrayRef);
        let file = parquet_file(columns);
        match load_file(file.path()) {
            Err(DataLoadError::InvalidCell { row, column, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "price");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }
}
