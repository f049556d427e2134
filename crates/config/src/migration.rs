use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<gallery_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let (migrated, added_fields) = migrate_document(&content)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), migrated).await?;

        if let Some(event_bus) = events {
            event_bus.emit(gallery_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

/// Adds every missing section and field, returning the new text and what was added
pub(crate) fn migrate_document(content: &str) -> anyhow::Result<(String, Vec<String>)> {
    let mut doc = content.parse::<DocumentMut>()?;
    let mut added_fields = Vec::new();

    migrate_server_section(&mut doc, &mut added_fields)?;
    migrate_storage_section(&mut doc, &mut added_fields)?;
    migrate_upload_section(&mut doc, &mut added_fields)?;
    migrate_client_section(&mut doc, &mut added_fields)?;

    Ok((doc.to_string(), added_fields))
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let server = ensure_table(doc.as_table_mut(), "server", "server", added_fields)?;

    ensure_field(server, "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "port", Value::from(8080), added_fields);
    ensure_field(
        server,
        "base_url",
        Value::from("http://localhost:8080"),
        added_fields,
    );
    ensure_field(server, "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "timeout_secs", Value::from(60), added_fields);
    ensure_field(server, "max_body_size_mb", Value::from(100), added_fields);
    ensure_field(
        server,
        "streaming_threshold_mb",
        Value::from(16),
        added_fields,
    );
    ensure_field(server, "enable_compression", Value::from(true), added_fields);

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("server.allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let storage = ensure_table(doc.as_table_mut(), "storage", "storage", added_fields)?;
    ensure_field(storage, "backend", Value::from("json"), added_fields);
    ensure_field(
        storage,
        "data_path",
        Value::from("data/gallery.json"),
        added_fields,
    );

    let assets = ensure_table(storage, "assets", "storage.assets", added_fields)?;
    ensure_field(assets, "backend", Value::from("local"), added_fields);
    ensure_field(assets, "path", Value::from("data/assets"), added_fields);
    ensure_field(
        assets,
        "public_url",
        Value::from("http://localhost:8080/assets"),
        added_fields,
    );

    let remote = ensure_table(storage, "remote", "storage.remote", added_fields)?;
    ensure_field(
        remote,
        "base_url",
        Value::from("http://localhost:8080/api"),
        added_fields,
    );

    // [storage.s3] is optional; serde defaults cover it when absent

    Ok(())
}

fn migrate_upload_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let upload = ensure_table(doc.as_table_mut(), "upload", "upload", added_fields)?;
    ensure_field(upload, "max_file_size_mb", Value::from(10), added_fields);

    if !upload.contains_key("allowed_mime_types") {
        let mut arr = Array::new();
        arr.push("image/jpeg");
        arr.push("image/png");
        arr.push("image/gif");
        upload["allowed_mime_types"] = Item::Value(Value::Array(arr));
        added_fields.push("upload.allowed_mime_types".to_string());
    }

    Ok(())
}

fn migrate_client_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let client = ensure_table(doc.as_table_mut(), "client", "client", added_fields)?;
    ensure_field(client, "request_timeout_secs", Value::from(30), added_fields);
    Ok(())
}

fn ensure_table<'a>(
    parent: &'a mut Table,
    key: &str,
    label: &str,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<&'a mut Table> {
    if !parent.contains_key(key) {
        parent.insert(key, Item::Table(Table::new()));
        added_fields.push(label.to_string());
    }

    parent[key]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [{}] section in config", label))
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
