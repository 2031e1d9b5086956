//! Exact money column type.

use std::fmt;
use std::ops::Deref;

use rust_decimal::Decimal;
use sea_orm::sea_query::{ArrayType, ColumnType, Nullable, Value, ValueType, ValueTypeErr};
use sea_orm::{ColIdx, DbErr, QueryResult, TryGetError, TryGetable};

/// A decimal amount that survives a database round trip unchanged.
///
/// SeaORM reads SQLite decimals through `f64`, so on SQLite money columns are
/// `TEXT` and are decoded from their string form. Postgres keeps a native
/// `DECIMAL(16, 4)` column. Writes always bind a decimal, which SQLite stores
/// as its canonical string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn into_inner(self) -> Decimal {
        self.0
    }
}

impl Deref for Money {
    type Target = Decimal;

    fn deref(&self) -> &Decimal {
        &self.0
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl PartialEq<Decimal> for Money {
    fn eq(&self, other: &Decimal) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Money> for Value {
    fn from(value: Money) -> Self {
        Value::Decimal(Some(Box::new(value.0)))
    }
}

impl Nullable for Money {
    fn null() -> Value {
        Value::Decimal(None)
    }
}

impl ValueType for Money {
    fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
        match v {
            Value::Decimal(Some(decimal)) => Ok(Money(*decimal)),
            Value::String(Some(text)) => text.trim().parse().map(Money).map_err(|_| ValueTypeErr),
            _ => Err(ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "Money".to_owned()
    }

    fn array_type() -> ArrayType {
        ArrayType::Decimal
    }

    fn column_type() -> ColumnType {
        ColumnType::Decimal(Some((16, 4)))
    }
}

impl TryGetable for Money {
    fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> Result<Self, TryGetError> {
        match String::try_get_by(res, idx) {
            Ok(text) => text.trim().parse().map(Money).map_err(|e| {
                TryGetError::DbErr(DbErr::TryIntoErr {
                    from: "String",
                    into: "Money",
                    source: Box::new(e),
                })
            }),
            Err(TryGetError::Null(column)) => Err(TryGetError::Null(column)),
            // Native decimal column
            Err(TryGetError::DbErr(_)) => Decimal::try_get_by(res, idx).map(Money),
        }
    }
}
