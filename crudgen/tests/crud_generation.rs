//! Integration tests for CRUD generation
//!
//! Runs the whole pipeline against a SQLite database in a temp directory:
//! introspection, scripted prompts, rendering and writing.

use std::fs;
use std::path::Path;

use crudgen::emitter::{emit, WriteOutcome};
use crudgen::flow::{CrudFlow, Presets};
use crudgen::schema::introspect::load_catalog;
use crudgen::testing::{Answer, ScriptedPrompter};
use crudgen::{CrudGenerator, Module, ModuleRegistry, SchemaCatalog};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

/// Create `app.db` with a `cms_navitem` table and return its URL
async fn create_database(dir: &Path) -> String {
    let path = dir.join("app.db");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(&path).create_if_missing(true))
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE cms_navitem (
            id INTEGER PRIMARY KEY,
            title VARCHAR(120) NOT NULL,
            body TEXT,
            active BOOLEAN NOT NULL DEFAULT 1
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    format!("sqlite://{}", path.display())
}

fn registry(base: &Path) -> ModuleRegistry {
    ModuleRegistry::new(vec![
        Module {
            id: "admin".to_string(),
            base_path: base.join("admin").display().to_string(),
            namespace: "luya\\admin".to_string(),
            admin: true,
            core: true,
        },
        Module {
            id: "cmsadmin".to_string(),
            base_path: base.join("cmsadmin").display().to_string(),
            namespace: "app\\modules\\cmsadmin".to_string(),
            admin: true,
            core: false,
        },
    ])
}

async fn catalog(dir: &TempDir) -> SchemaCatalog {
    let url = create_database(dir.path()).await;
    load_catalog(&url).await.unwrap()
}

#[tokio::test]
async fn test_interactive_run_writes_three_files() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog(&dir).await;
    let registry = registry(dir.path());

    let mut prompter = ScriptedPrompter::new(vec![
        // Only "cmsadmin" is admin and not core
        Answer::Select(0),
        Answer::input("nav item"),
        Answer::Confirm(true),
        Answer::input(""),
        Answer::input("cms_nav"),
        Answer::input(""),
        Answer::Confirm(true),
    ]);

    let request = CrudFlow::new(&registry, &catalog)
        .run(Presets::default(), &mut prompter)
        .unwrap();
    assert_eq!(request.model_name, "NavItem");
    assert_eq!(request.api_endpoint, "api-cms-navitem");
    assert_eq!(request.db_table_name, "cms_navitem");
    assert!(request.enable_i18n);
    assert_eq!(prompter.errors().len(), 1);

    let module = registry.require(&request.module_name).unwrap();
    let table = catalog.table(&request.db_table_name).unwrap();
    let crud = CrudGenerator::new().unwrap().generate(module, &request, table).unwrap();

    let outcomes = emit(&crud.files, &mut prompter).unwrap();
    assert_eq!(outcomes, vec![WriteOutcome::Written; 3]);

    let base = dir.path().join("cmsadmin");
    let api = fs::read_to_string(base.join("apis/NavItemController.php")).unwrap();
    let controller = fs::read_to_string(base.join("controllers/NavItemController.php")).unwrap();
    let model = fs::read_to_string(base.join("models/NavItem.php")).unwrap();

    assert!(api.contains("namespace app\\modules\\cmsadmin\\apis;"));
    assert!(controller.contains("namespace app\\modules\\cmsadmin\\controllers;"));
    assert!(model.contains("return 'cms_navitem';"));
    assert!(model.contains("return 'api-cms-navitem';"));
    assert!(model.contains("public $i18n = ['title'];"));
    assert!(model.contains("[['title'], 'string', 'max' => 120],"));
    assert!(model.contains("'title' => 'text',"));
    assert!(model.contains("'body' => 'textarea',"));
    assert!(model.contains("'active' => 'toggleStatus',"));
    assert!(!model.contains("'id' => 'number'"));

    assert!(crud.summary.contains("cmsadmin/nav-item/index"));
    assert_eq!(prompter.successes().len(), 3);
    assert_eq!(prompter.remaining(), 0);
}

#[tokio::test]
async fn test_second_run_asks_before_overwriting() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog(&dir).await;
    let registry = registry(dir.path());
    let presets = || Presets {
        module: Some("cmsadmin".to_string()),
        model: Some("NavItem".to_string()),
        api_endpoint: Some("api-cms-navitem".to_string()),
        table: Some("cms_navitem".to_string()),
        i18n: Some(false),
    };
    let generator = CrudGenerator::new().unwrap();
    let module = registry.require("cmsadmin").unwrap();
    let table = catalog.table("cms_navitem").unwrap();

    let mut first = ScriptedPrompter::default();
    let request = CrudFlow::new(&registry, &catalog).run(presets(), &mut first).unwrap();
    let crud = generator.generate(module, &request, table).unwrap();
    emit(&crud.files, &mut first).unwrap();

    let model_path = dir.path().join("cmsadmin/models/NavItem.php");
    fs::write(&model_path, "// hand edited").unwrap();

    // Keep the API, overwrite the controller, keep the edited model
    let mut second = ScriptedPrompter::new(vec![
        Answer::Confirm(false),
        Answer::Confirm(true),
        Answer::Confirm(false),
    ]);
    let request = CrudFlow::new(&registry, &catalog).run(presets(), &mut second).unwrap();
    let crud = generator.generate(module, &request, table).unwrap();
    let outcomes = emit(&crud.files, &mut second).unwrap();

    assert_eq!(
        outcomes,
        vec![WriteOutcome::Skipped, WriteOutcome::Written, WriteOutcome::Skipped]
    );
    assert_eq!(fs::read_to_string(&model_path).unwrap(), "// hand edited");
    assert_eq!(second.prompts().len(), 3);
}

#[tokio::test]
async fn test_unsupported_database_url() {
    let result = load_catalog("mysql://localhost/cms").await;
    assert!(matches!(result, Err(crudgen::CrudError::UnsupportedDatabase(_))));
}
