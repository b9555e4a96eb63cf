//! Text rendering of arbitrary result cells.
//!
//! A result grid shows every value as text, whatever its column type.
//! [`CellText`] is a [`FromSql`] target that accepts every Postgres type and
//! decodes the binary wire value into its customary textual form.

use std::error::Error;
use std::fmt::Write as _;
use tokio_postgres::types::{FromSql, Kind, Type};

type DecodeResult<T> = Result<T, Box<dyn Error + Sync + Send>>;

/// Text used for SQL NULL cells.
pub const NULL_TEXT: &str = "NULL";

/// One decoded cell. `None` is SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText(pub Option<String>);

impl CellText {
    /// The display text: the value itself, or `NULL`.
    pub fn into_display(self) -> String {
        self.0.unwrap_or_else(|| NULL_TEXT.to_string())
    }
}

impl<'a> FromSql<'a> for CellText {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> DecodeResult<Self> {
        render_value(ty, raw).map(|s| CellText(Some(s)))
    }

    fn from_sql_null(_ty: &Type) -> DecodeResult<Self> {
        Ok(CellText(None))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

fn render_value(ty: &Type, raw: &[u8]) -> DecodeResult<String> {
    match ty.kind() {
        Kind::Array(_) => return render_array(ty, raw),
        Kind::Domain(inner) => return render_value(inner, raw),
        Kind::Enum(_) => return Ok(std::str::from_utf8(raw)?.to_string()),
        _ => {}
    }

    let text = match *ty {
        Type::BOOL => bool::from_sql(ty, raw)?.to_string(),
        Type::CHAR => i8::from_sql(ty, raw)?.to_string(),
        Type::INT2 => i16::from_sql(ty, raw)?.to_string(),
        Type::INT4 => i32::from_sql(ty, raw)?.to_string(),
        Type::INT8 => i64::from_sql(ty, raw)?.to_string(),
        Type::OID => u32::from_sql(ty, raw)?.to_string(),
        Type::FLOAT4 => f32::from_sql(ty, raw)?.to_string(),
        Type::FLOAT8 => f64::from_sql(ty, raw)?.to_string(),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            String::from_sql(ty, raw)?
        }
        #[cfg(feature = "rust_decimal")]
        Type::NUMERIC => rust_decimal::Decimal::from_sql(ty, raw)?.to_string(),
        Type::DATE => chrono::NaiveDate::from_sql(ty, raw)?.to_string(),
        Type::TIME => chrono::NaiveTime::from_sql(ty, raw)?.to_string(),
        Type::TIMESTAMP => chrono::NaiveDateTime::from_sql(ty, raw)?.to_string(),
        Type::TIMESTAMPTZ => chrono::DateTime::<chrono::Utc>::from_sql(ty, raw)?.to_string(),
        Type::UUID => uuid::Uuid::from_sql(ty, raw)?.to_string(),
        Type::JSON | Type::JSONB => serde_json::Value::from_sql(ty, raw)?.to_string(),
        Type::BYTEA => render_bytea(raw),
        _ => format!("<{}>", ty.name()),
    };
    Ok(text)
}

/// `\x`-prefixed lowercase hex, the Postgres `bytea_output = hex` form.
fn render_bytea(raw: &[u8]) -> String {
    let mut out = String::with_capacity(2 + raw.len() * 2);
    out.push_str("\\x");
    for b in raw {
        let _ = write!(out, "{b:02x}");
    }
    out
}

fn render_array(ty: &Type, raw: &[u8]) -> DecodeResult<String> {
    let items = Vec::<CellText>::from_sql(ty, raw)?;
    let parts: Vec<String> = items.into_iter().map(CellText::into_display).collect();
    Ok(format!("{{{}}}", parts.join(",")))
}
