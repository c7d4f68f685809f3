#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use magpie::domain::Category;
    use magpie::report::closure::{descendant_ids_query, descendant_set};
    use magpie::sql::Dialect;
    use uuid::Uuid;

    struct Forest {
        categories: Vec<Category>,
    }

    impl Forest {
        fn new() -> Self {
            Self { categories: vec![] }
        }

        fn add(&mut self, name: &str, parent_id: Option<Uuid>) -> Uuid {
            let id = Uuid::new_v4();
            self.categories.push(Category {
                id,
                name: name.to_string(),
                parent_id,
            });
            id
        }
    }

    /// Electronics -> Phones -> Smartphones, Electronics -> Laptops,
    /// plus an unrelated Books -> Fiction subtree.
    fn electronics_forest() -> (Forest, Uuid, Uuid, Uuid, Uuid) {
        let mut forest = Forest::new();
        let electronics = forest.add("Electronics", None);
        let phones = forest.add("Phones", Some(electronics));
        let smartphones = forest.add("Smartphones", Some(phones));
        let laptops = forest.add("Laptops", Some(electronics));
        let books = forest.add("Books", None);
        forest.add("Fiction", Some(books));
        (forest, electronics, phones, smartphones, laptops)
    }

    #[test]
    fn test_closure_reaches_all_descendants() {
        let (forest, _, phones, smartphones, laptops) = electronics_forest();
        let closure = descendant_set(&forest.categories, "Electronics");

        let expected: HashSet<Uuid> = [phones, smartphones, laptops].into_iter().collect();
        assert_eq!(closure, expected);
    }

    #[test]
    fn test_closure_excludes_root_and_siblings() {
        let (forest, electronics, ..) = electronics_forest();
        let closure = descendant_set(&forest.categories, "Electronics");

        // The named category itself is not its own descendant
        assert!(!closure.contains(&electronics));
        // Unrelated subtrees stay out
        for category in &forest.categories {
            if category.name == "Books" || category.name == "Fiction" {
                assert!(!closure.contains(&category.id));
            }
        }
    }

    #[test]
    fn test_closure_of_mid_tree_node() {
        let (forest, _, _, smartphones, _) = electronics_forest();
        let closure = descendant_set(&forest.categories, "Phones");
        assert_eq!(closure, [smartphones].into_iter().collect());
    }

    #[test]
    fn test_closure_of_leaf_is_empty() {
        let (forest, ..) = electronics_forest();
        assert!(descendant_set(&forest.categories, "Smartphones").is_empty());
    }

    #[test]
    fn test_unknown_name_yields_empty_set() {
        let (forest, ..) = electronics_forest();
        assert!(descendant_set(&forest.categories, "Groceries").is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (forest, ..) = electronics_forest();
        let first = descendant_set(&forest.categories, "Electronics");
        let second = descendant_set(&forest.categories, "Electronics");
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_names_merge_their_subtrees() {
        // Category names are not unique; the closure covers every
        // subtree rooted under any category of the name
        let mut forest = Forest::new();
        let sale_one = forest.add("Sale", None);
        let sale_two = forest.add("Sale", None);
        let winter = forest.add("Winter", Some(sale_one));
        let summer = forest.add("Summer", Some(sale_two));

        let closure = descendant_set(&forest.categories, "Sale");
        assert_eq!(closure, [winter, summer].into_iter().collect());
    }

    #[test]
    fn test_deep_chain_terminates() {
        let mut forest = Forest::new();
        let mut parent = forest.add("Root", None);
        let mut expected = HashSet::new();
        for depth in 0..100 {
            parent = forest.add(&format!("level-{depth}"), Some(parent));
            expected.insert(parent);
        }

        assert_eq!(descendant_set(&forest.categories, "Root"), expected);
    }

    #[test]
    fn test_cte_query_matches_fixpoint_shape() {
        // The SQL closure traverses the same relation the fixpoint walks:
        // seeded by parent name, stepped through parent_id
        let sql = descendant_ids_query("Electronics").to_sql(Dialect::Postgres);
        assert!(sql.contains("\"pc\".\"name\" = 'Electronics'"));
        assert!(sql.contains("\"c\".\"parent_id\" = \"d\".\"id\""));
        assert!(sql.contains("UNION ALL"));
    }
}
