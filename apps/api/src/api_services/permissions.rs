use bouwdesk_core::AppError;
use bouwdesk_domain::PermissionTable;
use tracing::info;

/// Loads the permission policy file, or the built-in portal policy when no path is set.
pub(super) async fn load_permission_table(path: Option<&str>) -> Result<PermissionTable, AppError> {
    let Some(path) = path else {
        info!("using built-in portal permission table");
        return Ok(PermissionTable::portal_defaults());
    };

    let document = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Validation(format!("failed to read PERMISSION_TABLE_PATH '{path}': {error}"))
    })?;
    let table = PermissionTable::from_json(document.as_str())?;

    info!(
        path,
        routes = table.routes().count(),
        actions = table.actions().count(),
        "loaded permission table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::load_permission_table;

    #[tokio::test]
    async fn missing_path_falls_back_to_portal_defaults() {
        let table = load_permission_table(None)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert!(table.roles_for_action("tenders:write").is_some());
    }

    #[tokio::test]
    async fn unreadable_file_is_a_configuration_error() {
        let result = load_permission_table(Some("/nonexistent/bouwdesk-permissions.json")).await;
        assert!(result.is_err());
    }
}
