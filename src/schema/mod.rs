//! Compile-time-checked descriptors for the relational schema.
//!
//! Each table gets a `const` descriptor carrying its physical name, the fixed
//! alias the report planners join it under, and a [`ColumnRef`] per column.
//! Planners can only name columns through these descriptors, so a misspelled
//! field is a compile error rather than a runtime string lookup.

use crate::sql::expr::{table_col, Expr};
use crate::sql::query::TableRef;

/// A column of a known table, bound to that table's query alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    table_alias: &'static str,
    column: &'static str,
}

impl ColumnRef {
    pub const fn new(table_alias: &'static str, column: &'static str) -> Self {
        Self {
            table_alias,
            column,
        }
    }

    /// Qualified column expression under the table's fixed alias.
    pub fn expr(&self) -> Expr {
        table_col(self.table_alias, self.column)
    }

    /// Qualified column expression under a caller-chosen alias
    /// (self-joins reference the same table twice).
    pub fn qualified(&self, alias: &str) -> Expr {
        table_col(alias, self.column)
    }

    /// Bare column name.
    pub const fn name(&self) -> &'static str {
        self.column
    }
}

/// The `store` table.
#[derive(Debug, Clone, Copy)]
pub struct StoreTable {
    pub name: &'static str,
    pub alias: &'static str,
    pub id: ColumnRef,
}

/// The `order` table. The physical name is a reserved SQL keyword; the
/// dialect layer quotes every identifier, which keeps it safe.
#[derive(Debug, Clone, Copy)]
pub struct OrderTable {
    pub name: &'static str,
    pub alias: &'static str,
    pub id: ColumnRef,
    pub store_id: ColumnRef,
    pub customer_id: ColumnRef,
    pub status: ColumnRef,
    pub created_at: ColumnRef,
    pub finished_at: ColumnRef,
}

/// The `order_status_history` table.
#[derive(Debug, Clone, Copy)]
pub struct StatusHistoryTable {
    pub name: &'static str,
    pub alias: &'static str,
    pub id: ColumnRef,
    pub order_id: ColumnRef,
    pub status: ColumnRef,
    pub changed_at: ColumnRef,
}

/// The `order_item` table.
#[derive(Debug, Clone, Copy)]
pub struct OrderItemTable {
    pub name: &'static str,
    pub alias: &'static str,
    pub id: ColumnRef,
    pub order_id: ColumnRef,
    pub product_id: ColumnRef,
    pub quantity: ColumnRef,
}

/// The `product` table.
#[derive(Debug, Clone, Copy)]
pub struct ProductTable {
    pub name: &'static str,
    pub alias: &'static str,
    pub id: ColumnRef,
    pub price: ColumnRef,
    pub category_id: ColumnRef,
}

/// The `category` table (self-referential forest via `parent_id`).
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    pub name: &'static str,
    pub alias: &'static str,
    pub id: ColumnRef,
    pub category_name: ColumnRef,
    pub parent_id: ColumnRef,
}

macro_rules! table_ref_impl {
    ($($table:ty),+) => {
        $(impl $table {
            /// FROM/JOIN reference under the table's fixed alias.
            pub fn table_ref(&self) -> TableRef {
                TableRef::new(self.name).with_alias(self.alias)
            }

            /// FROM/JOIN reference under a caller-chosen alias (self-joins).
            pub fn aliased_ref(&self, alias: &str) -> TableRef {
                TableRef::new(self.name).with_alias(alias)
            }
        })+
    };
}

table_ref_impl!(
    StoreTable,
    OrderTable,
    StatusHistoryTable,
    OrderItemTable,
    ProductTable,
    CategoryTable
);

pub const STORES: StoreTable = StoreTable {
    name: "store",
    alias: "s",
    id: ColumnRef::new("s", "id"),
};

pub const ORDERS: OrderTable = OrderTable {
    name: "order",
    alias: "o",
    id: ColumnRef::new("o", "id"),
    store_id: ColumnRef::new("o", "store_id"),
    customer_id: ColumnRef::new("o", "customer_id"),
    status: ColumnRef::new("o", "status"),
    created_at: ColumnRef::new("o", "created_at"),
    finished_at: ColumnRef::new("o", "finished_at"),
};

pub const STATUS_HISTORY: StatusHistoryTable = StatusHistoryTable {
    name: "order_status_history",
    alias: "h",
    id: ColumnRef::new("h", "id"),
    order_id: ColumnRef::new("h", "order_id"),
    status: ColumnRef::new("h", "status"),
    changed_at: ColumnRef::new("h", "changed_at"),
};

pub const ORDER_ITEMS: OrderItemTable = OrderItemTable {
    name: "order_item",
    alias: "i",
    id: ColumnRef::new("i", "id"),
    order_id: ColumnRef::new("i", "order_id"),
    product_id: ColumnRef::new("i", "product_id"),
    quantity: ColumnRef::new("i", "quantity"),
};

pub const PRODUCTS: ProductTable = ProductTable {
    name: "product",
    alias: "p",
    id: ColumnRef::new("p", "id"),
    price: ColumnRef::new("p", "price"),
    category_id: ColumnRef::new("p", "category_id"),
};

pub const CATEGORIES: CategoryTable = CategoryTable {
    name: "category",
    alias: "c",
    id: ColumnRef::new("c", "id"),
    category_name: ColumnRef::new("c", "name"),
    parent_id: ColumnRef::new("c", "parent_id"),
};
