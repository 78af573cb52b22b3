//! End-to-end checks of the browse, delete and insert flows against real
//! SQLite files.
//!
//! Each test builds a small store in a temp directory, then drives it
//! through the services or the [`Workbench`] the way the front-end does.

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};

    use crate::error::{ErrorInfo, QuokkaError};
    use crate::models::{ConnectionDescriptor, TableName, Value};
    use crate::services::{
        Confirmation, ConnectionProvider, DeleteOutcome, Prompter, RowDeleter, SchemaService,
        TableService,
    };
    use crate::sql;
    use crate::workbench::Workbench;

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Prompter that answers confirmations from a script and records dialogs.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<Confirmation>,
        confirms: Vec<String>,
        errors: Vec<ErrorInfo>,
    }

    impl Scripted {
        fn answering(answers: &[Confirmation]) -> Self {
            Self { answers: answers.iter().copied().collect(), ..Self::default() }
        }
    }

    impl Prompter for Scripted {
        fn confirm(&mut self, _title: &str, message: &str) -> Confirmation {
            self.confirms.push(message.to_string());
            self.answers.pop_front().unwrap_or(Confirmation::Dismissed)
        }

        fn show_error(&mut self, info: &ErrorInfo) {
            self.errors.push(info.clone());
        }
    }

    fn store(dir: &Path, batch: &str) -> PathBuf {
        let path = dir.join("library.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(batch).unwrap();
        path
    }

    fn library(dir: &Path) -> PathBuf {
        store(
            dir,
            "CREATE TABLE Books (Title TEXT PRIMARY KEY, Author TEXT, Year INTEGER);
             INSERT INTO Books VALUES ('Dune', 'Herbert', 1965);
             INSERT INTO Books VALUES ('Emma', 'Austen', 1815);
             CREATE TABLE Tags (Name TEXT, Weight INTEGER);
             INSERT INTO Tags VALUES ('x', 1);
             INSERT INTO Tags VALUES ('x', 1);
             INSERT INTO Tags VALUES ('y', 2);",
        )
    }

    fn count(path: &Path, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(path).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM [{table}]"), [], |row| row.get(0)).unwrap()
    }

    fn name(s: &str) -> TableName {
        TableName::new(s).unwrap()
    }

    // =========================================================================
    // Schema listing
    // =========================================================================

    #[test]
    fn test_lists_user_tables_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let descriptor = ConnectionDescriptor::sqlite(&path);

        let tables =
            ConnectionProvider::with_connection(&descriptor, SchemaService::list_tables).unwrap();
        assert_eq!(tables, vec![name("Books"), name("Tags")]);
    }

    #[test]
    fn test_store_without_tables_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(dir.path(), "PRAGMA user_version = 1;");
        let descriptor = ConnectionDescriptor::sqlite(&path);

        let tables =
            ConnectionProvider::with_connection(&descriptor, SchemaService::list_tables).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_missing_file_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = ConnectionDescriptor::sqlite(dir.path().join("absent.db"));

        let err = ConnectionProvider::open(&descriptor).err().unwrap();
        assert!(matches!(err, QuokkaError::Connection { .. }));
        assert!(!dir.path().join("absent.db").exists());
    }

    // =========================================================================
    // Table fetch
    // =========================================================================

    #[test]
    fn test_every_row_matches_column_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let descriptor = ConnectionDescriptor::sqlite(&path);

        for table in ["Books", "Tags"] {
            let snapshot = ConnectionProvider::with_connection(&descriptor, |conn| {
                TableService::fetch_table(conn, &name(table))
            })
            .unwrap();
            assert!(snapshot.rows().iter().all(|row| row.len() == snapshot.columns().len()));
        }
    }

    #[test]
    fn test_fetch_of_missing_table_is_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let descriptor = ConnectionDescriptor::sqlite(&path);

        let err = ConnectionProvider::with_connection(&descriptor, |conn| {
            TableService::fetch_table(conn, &name("Nope"))
        })
        .unwrap_err();
        assert_eq!(err.category(), "Query");
        assert_eq!(err.table(), Some("Nope"));
    }

    // =========================================================================
    // Identifiers with spaces
    // =========================================================================

    #[test]
    fn test_table_name_with_space_works_in_every_statement() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(
            dir.path(),
            "CREATE TABLE [Order Items] ([Item Name] TEXT, Qty INTEGER);
             INSERT INTO [Order Items] VALUES ('Bolt', 3);",
        );
        let descriptor = ConnectionDescriptor::sqlite(&path);
        let table = name("Order Items");

        let snapshot = ConnectionProvider::with_connection(&descriptor, |conn| {
            TableService::fetch_table(conn, &table)
        })
        .unwrap();
        assert_eq!(snapshot.columns().get(0), Some("Item Name"));

        let insert = sql::insert_row(&table, snapshot.columns()).unwrap();
        ConnectionProvider::with_connection(&descriptor, |conn| {
            conn.execute(&insert, &[Value::from("Nut"), Value::from("7")])
                .map_err(|e| QuokkaError::insert(table.as_str(), e))
        })
        .unwrap();
        assert_eq!(count(&path, "Order Items"), 2);

        let first = snapshot.row(0).unwrap().clone();
        let affected = ConnectionProvider::with_connection(&descriptor, |conn| {
            RowDeleter::delete_row(conn, &table, snapshot.columns(), &first)
        })
        .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(count(&path, "Order Items"), 1);
    }

    // =========================================================================
    // Delete through the workbench
    // =========================================================================

    #[test]
    fn test_confirmed_delete_removes_one_row_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Confirmed]),
        );

        assert!(bench.select_table(&name("Books")));
        let outcome = bench.delete_row(0);

        assert_eq!(outcome, Some(DeleteOutcome::Deleted { affected: 1 }));
        let model = bench.model().unwrap();
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.cell_text(0, 0), "Emma");
        assert_eq!(count(&path, "Books"), 1);
        assert!(bench.prompter_mut().confirms[0].contains("Dune"));
    }

    #[test]
    fn test_declined_delete_opens_no_connection() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Dismissed]),
        );
        assert!(bench.select_table(&name("Books")));
        let before = bench.model().unwrap().snapshot().clone();

        // Any connection attempt would now fail and be reported.
        std::fs::remove_file(&path).unwrap();
        let outcome = bench.delete_row(1);

        assert_eq!(outcome, Some(DeleteOutcome::Declined));
        assert_eq!(bench.model().unwrap().snapshot(), &before);
        assert!(bench.prompter_mut().errors.is_empty());
    }

    #[test]
    fn test_duplicate_rows_all_deleted_but_snapshot_loses_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Confirmed]),
        );
        assert!(bench.select_table(&name("Tags")));
        assert_eq!(bench.model().unwrap().row_count(), 3);

        let outcome = bench.delete_row(0);

        assert_eq!(outcome, Some(DeleteOutcome::Deleted { affected: 2 }));
        assert_eq!(bench.model().unwrap().row_count(), 2);
        assert_eq!(count(&path, "Tags"), 1);

        assert!(bench.refresh());
        assert_eq!(bench.model().unwrap().row_count(), 1);
    }

    #[test]
    fn test_null_values_match_in_delete_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(
            dir.path(),
            "CREATE TABLE Notes (Body TEXT, Author TEXT);
             INSERT INTO Notes VALUES ('hello', NULL);
             INSERT INTO Notes VALUES ('bye', 'Ann');",
        );
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Confirmed]),
        );
        assert!(bench.select_table(&name("Notes")));
        assert_eq!(bench.model().unwrap().cell_text(0, 1), "");

        let outcome = bench.delete_row(0);

        assert_eq!(outcome, Some(DeleteOutcome::Deleted { affected: 1 }));
        assert_eq!(count(&path, "Notes"), 1);
    }

    #[test]
    fn test_non_utf8_text_is_deleted_by_its_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(
            dir.path(),
            "CREATE TABLE T (a TEXT);
             INSERT INTO T VALUES (CAST(x'61ff62' AS TEXT));",
        );
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Confirmed]),
        );
        assert!(bench.select_table(&name("T")));

        let outcome = bench.delete_row(0);

        assert_eq!(outcome, Some(DeleteOutcome::Deleted { affected: 1 }));
        assert_eq!(bench.model().unwrap().row_count(), 0);
        assert_eq!(count(&path, "T"), 0);
        assert!(bench.prompter_mut().errors.is_empty());
    }

    #[test]
    fn test_row_changed_elsewhere_is_kept_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(
            dir.path(),
            "CREATE TABLE T (a TEXT);
             INSERT INTO T VALUES ('x');",
        );
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Confirmed]),
        );
        assert!(bench.select_table(&name("T")));

        let other = rusqlite::Connection::open(&path).unwrap();
        other.execute_batch("UPDATE T SET a = 'y';").unwrap();
        drop(other);

        let outcome = bench.delete_row(0);

        assert_eq!(outcome, None);
        assert_eq!(bench.model().unwrap().row_count(), 1);
        assert_eq!(count(&path, "T"), 1);
        let errors = &bench.prompter_mut().errors;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, "Delete Error");
        assert_eq!(errors[0].technical_detail.as_deref(), Some("Table: T\nFilter: [a] = ?"));
    }

    #[test]
    fn test_delete_failure_keeps_row_and_reports_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(&path),
            Scripted::answering(&[Confirmation::Confirmed]),
        );
        assert!(bench.select_table(&name("Books")));

        let locker = rusqlite::Connection::open(&path).unwrap();
        locker.execute_batch("BEGIN EXCLUSIVE;").unwrap();

        let outcome = bench.delete_row(0);
        locker.execute_batch("ROLLBACK;").unwrap();

        assert_eq!(outcome, None);
        assert_eq!(bench.model().unwrap().row_count(), 2);
        let errors = &bench.prompter_mut().errors;
        assert_eq!(errors.len(), 1);
        assert!(errors[0].error_type == "Delete Error" || errors[0].error_type == "Connection Error");
    }

    // =========================================================================
    // Insert through the workbench
    // =========================================================================

    #[test]
    fn test_inserted_row_appears_after_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(ConnectionDescriptor::sqlite(&path), Scripted::default());
        assert!(bench.select_table(&name("Books")));

        assert!(bench.open_editor());
        let editor = bench.editor_mut();
        assert!(editor.set_field(0, "Title A"));
        assert!(editor.set_field(1, "Author B"));
        assert!(editor.set_field(2, "1999"));
        assert!(bench.save_editor());
        assert!(!bench.editor().is_open());

        // The grid is not refreshed automatically.
        assert_eq!(bench.model().unwrap().row_count(), 2);

        assert!(bench.refresh());
        let model = bench.model().unwrap();
        let texts: Vec<Vec<String>> = (0..model.row_count())
            .map(|row| (0..3).map(|col| model.cell_text(row, col)).collect())
            .collect();
        assert!(texts.contains(&vec!["Title A".to_string(), "Author B".into(), "1999".into()]));
    }

    #[test]
    fn test_failed_insert_keeps_form_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(ConnectionDescriptor::sqlite(&path), Scripted::default());
        assert!(bench.select_table(&name("Books")));

        assert!(bench.open_editor());
        bench.editor_mut().set_field(0, "Dune");
        bench.editor_mut().set_field(1, "Someone");

        assert!(!bench.save_editor());
        let editor = bench.editor();
        assert!(editor.is_open());
        assert_eq!(editor.fields().unwrap(), ["Dune", "Someone", ""]);
        assert!(editor.last_error().is_some());
        assert_eq!(bench.prompter_mut().errors[0].error_type, "Insert Error");
        assert_eq!(count(&path, "Books"), 2);
    }

    #[test]
    fn test_cancel_discards_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(ConnectionDescriptor::sqlite(&path), Scripted::default());
        assert!(bench.select_table(&name("Books")));

        assert!(bench.open_editor());
        bench.editor_mut().set_field(0, "Draft");
        bench.cancel_editor();
        assert!(!bench.editor().is_open());

        assert!(bench.open_editor());
        assert_eq!(bench.editor().fields().unwrap(), ["", "", ""]);
        assert_eq!(count(&path, "Books"), 2);
    }

    #[test]
    fn test_editor_requires_selected_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(ConnectionDescriptor::sqlite(&path), Scripted::default());

        assert!(!bench.open_editor());
        assert!(!bench.save_editor());
        assert_eq!(bench.prompter_mut().errors.len(), 2);
    }

    // =========================================================================
    // Error reporting
    // =========================================================================

    #[test]
    fn test_failed_fetch_keeps_previous_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = library(dir.path());
        let mut bench = Workbench::new(ConnectionDescriptor::sqlite(&path), Scripted::default());

        assert!(bench.load_tables());
        assert_eq!(bench.tables().len(), 2);
        assert!(bench.select_table(&name("Books")));

        assert!(!bench.select_table(&name("Missing")));
        assert_eq!(bench.model().unwrap().table().as_str(), "Books");
        let errors = &bench.prompter_mut().errors;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, "Query Error");
    }

    #[test]
    fn test_unreachable_file_leaves_table_list_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut bench = Workbench::new(
            ConnectionDescriptor::sqlite(dir.path().join("gone.db")),
            Scripted::default(),
        );

        assert!(!bench.load_tables());
        assert!(bench.tables().is_empty());
        assert!(bench.model().is_none());
        let errors = &bench.prompter_mut().errors;
        assert_eq!(errors[0].error_type, "Connection Error");
        assert!(errors[0].hint.is_some());
    }
}
