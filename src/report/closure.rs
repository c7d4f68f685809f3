//! Category closure resolver.
//!
//! Given a category name, the closure is the set of every category whose
//! ancestor chain passes through a category of that name. Two equivalent
//! implementations exist: a recursive CTE for gateways with native
//! recursive-query support, and an in-memory breadth-first fixpoint over
//! `Category` records for gateways without it. Both produce the same node
//! set on the same forest.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::Category;
use crate::schema::CATEGORIES;
use crate::sql::{lit_str, table_col, Cte, ExprExt, Query, TableRef};

/// Name of the recursive CTE produced by [`descendant_categories`].
pub const DESCENDANT_CTE: &str = "descendant_category";

/// Alias for the parent side of the category self-join.
const PARENT: &str = "pc";

/// Alias the CTE is referenced under.
const CTE_ALIAS: &str = "d";

/// Build the recursive CTE `descendant_category (id)`.
///
/// Base step: every category whose parent's name equals `category_name`
/// (category self-joined to its parent row). Recursive step: every category
/// whose `parent_id` is in the previous iteration. UNION ALL is safe: each
/// node has one parent, so no row is produced twice, and the forest is
/// acyclic and finite, so the iteration terminates.
pub fn descendant_categories(category_name: &str) -> Cte {
    let base = Query::new()
        .select(vec![CATEGORIES.id.expr()])
        .from(CATEGORIES.table_ref())
        .inner_join(
            CATEGORIES.aliased_ref(PARENT),
            CATEGORIES
                .parent_id
                .expr()
                .eq(CATEGORIES.id.qualified(PARENT)),
        )
        .filter(
            CATEGORIES
                .category_name
                .qualified(PARENT)
                .eq(lit_str(category_name)),
        );

    let step = Query::new()
        .select(vec![CATEGORIES.id.expr()])
        .from(CATEGORIES.table_ref())
        .inner_join(
            TableRef::new(DESCENDANT_CTE).with_alias(CTE_ALIAS),
            CATEGORIES
                .parent_id
                .expr()
                .eq(table_col(CTE_ALIAS, "id")),
        );

    Cte::recursive(DESCENDANT_CTE, base.union_all(step)).with_columns(vec!["id"])
}

/// Standalone query returning the closure's identifiers.
pub fn descendant_ids_query(category_name: &str) -> Query {
    Query::new()
        .with_cte(descendant_categories(category_name))
        .select(vec![table_col(CTE_ALIAS, "id").alias("id")])
        .from(TableRef::new(DESCENDANT_CTE).with_alias(CTE_ALIAS))
}

/// In-memory fixpoint over a category snapshot: the same node set the
/// recursive CTE computes.
///
/// An unknown name yields an empty set, never an error.
pub fn descendant_set(categories: &[Category], category_name: &str) -> HashSet<Uuid> {
    let named: HashSet<Uuid> = categories
        .iter()
        .filter(|c| c.name == category_name)
        .map(|c| c.id)
        .collect();

    let mut children_of: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for category in categories {
        if let Some(parent_id) = category.parent_id {
            children_of.entry(parent_id).or_default().push(category.id);
        }
    }

    // Base step: direct children of every category named `category_name`
    let mut frontier: Vec<Uuid> = categories
        .iter()
        .filter(|c| c.parent_id.is_some_and(|p| named.contains(&p)))
        .map(|c| c.id)
        .collect();

    let mut closure = HashSet::new();
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for id in frontier {
            if closure.insert(id) {
                if let Some(children) = children_of.get(&id) {
                    next.extend(children.iter().copied());
                }
            }
        }
        frontier = next;
    }

    closure
}
