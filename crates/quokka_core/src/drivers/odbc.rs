//! ODBC driver for Access files.
//!
//! Integer and floating point columns are fetched as `i64`/`f64` and bound
//! back with the same C type, so a value read from a row compares equal to
//! the stored one. Binary columns come back as bytes. Everything else
//! (character, decimal, currency, date/time) is read as the driver's text
//! rendering, which the driver converts back to the column type on
//! comparison.

use std::sync::OnceLock;

use odbc_api::parameter::{InputParameter, VarBinaryBox, VarCharBox};
use odbc_api::{
    Connection, ConnectionOptions, Cursor, CursorRow, DataType, Environment, Nullable,
    ResultSetMetadata,
};

use super::{Backend, ResultSet};
use crate::error::DriverError;
use crate::models::Value;

/// Catalog type of ordinary user tables; Access reports its own as `SYSTEM TABLE`.
const USER_TABLE_TYPE: &str = "TABLE";

/// Column of the catalog result holding the table name.
const CATALOG_TABLE_NAME: u16 = 3;

/// Column of the catalog result holding the table type.
const CATALOG_TABLE_TYPE: u16 = 4;

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// The driver manager environment, allocated once per process.
fn environment() -> Result<&'static Environment, DriverError> {
    if let Some(env) = ENVIRONMENT.get() {
        return Ok(env);
    }
    let env = Environment::new()?;
    Ok(ENVIRONMENT.get_or_init(|| env))
}

/// An open ODBC connection.
pub struct OdbcBackend {
    connection: Connection<'static>,
}

impl OdbcBackend {
    /// Connect using a full ODBC connection string.
    pub fn connect(connection_string: &str) -> Result<Self, DriverError> {
        let connection = environment()?
            .connect_with_connection_string(connection_string, ConnectionOptions::default())?;
        Ok(Self { connection })
    }
}

impl Backend for OdbcBackend {
    fn list_tables(&mut self) -> Result<Vec<String>, DriverError> {
        let mut cursor = self.connection.tables("", "", "", USER_TABLE_TYPE)?;
        let mut names = Vec::new();
        let mut name = Vec::new();
        let mut kind = Vec::new();

        while let Some(mut row) = cursor.next_row()? {
            if !row.get_text(CATALOG_TABLE_NAME, &mut name)? {
                continue;
            }
            row.get_text(CATALOG_TABLE_TYPE, &mut kind)?;
            if kind == USER_TABLE_TYPE.as_bytes() {
                names.push(String::from_utf8_lossy(&name).into_owned());
            }
        }

        Ok(names)
    }

    fn query(&mut self, sql: &str) -> Result<ResultSet, DriverError> {
        let Some(mut cursor) = self.connection.execute(sql, (), None)? else {
            return Ok(ResultSet::default());
        };

        let columns = cursor.column_names()?.collect::<Result<Vec<String>, _>>()?;
        let width = u16::try_from(columns.len())
            .map_err(|_| DriverError::new("Too many columns in result"))?;
        let kinds = (1..=width)
            .map(|column| Ok(FetchKind::of(&cursor.col_data_type(column)?)))
            .collect::<Result<Vec<_>, DriverError>>()?;

        let mut rows = Vec::new();
        let mut buf = Vec::new();
        while let Some(mut row) = cursor.next_row()? {
            let mut values = Vec::with_capacity(kinds.len());
            for (column, kind) in (1..=width).zip(&kinds) {
                values.push(kind.fetch(&mut row, column, &mut buf)?);
            }
            rows.push(values);
        }

        Ok(ResultSet { columns, rows })
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, DriverError> {
        let bound: Vec<Box<dyn InputParameter>> = params.iter().map(to_parameter).collect();
        let mut statement = self.connection.preallocate()?;
        statement.execute(sql, bound.as_slice())?;
        let affected = statement.row_count()?.unwrap_or(0);
        Ok(affected as u64)
    }
}

/// How a column is read, chosen from its described SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Integer,
    Real,
    Binary,
    Text,
}

impl FetchKind {
    fn of(data_type: &DataType) -> Self {
        match data_type {
            DataType::TinyInt
            | DataType::SmallInt
            | DataType::Integer
            | DataType::BigInt
            | DataType::Bit => Self::Integer,
            DataType::Real | DataType::Double | DataType::Float { .. } => Self::Real,
            DataType::Binary { .. } | DataType::Varbinary { .. } | DataType::LongVarbinary { .. } => {
                Self::Binary
            }
            _ => Self::Text,
        }
    }

    fn fetch(
        self,
        row: &mut CursorRow<'_>,
        column: u16,
        buf: &mut Vec<u8>,
    ) -> Result<Value, DriverError> {
        let value = match self {
            Self::Integer => {
                let mut field = Nullable::<i64>::null();
                row.get_data(column, &mut field)?;
                field.into_opt().map_or(Value::Null, Value::Integer)
            }
            Self::Real => {
                let mut field = Nullable::<f64>::null();
                row.get_data(column, &mut field)?;
                field.into_opt().map_or(Value::Null, Value::Real)
            }
            Self::Binary => {
                if row.get_binary(column, buf)? {
                    Value::Blob(buf.clone())
                } else {
                    Value::Null
                }
            }
            Self::Text => {
                if row.get_text(column, buf)? {
                    match std::str::from_utf8(buf) {
                        Ok(text) => Value::Text(text.to_string()),
                        Err(_) => Value::RawText(buf.clone()),
                    }
                } else {
                    Value::Null
                }
            }
        };
        Ok(value)
    }
}

/// Bind a value with the C type it was fetched as.
fn to_parameter(value: &Value) -> Box<dyn InputParameter> {
    match value {
        Value::Null => Box::new(VarCharBox::null()),
        Value::Integer(v) => Box::new(*v),
        Value::Real(v) => Box::new(*v),
        Value::Text(v) => Box::new(VarCharBox::from_string(v.clone())),
        Value::RawText(v) => Box::new(VarCharBox::from_vec(v.clone())),
        Value::Blob(v) => Box::new(VarBinaryBox::from_vec(v.clone())),
    }
}
