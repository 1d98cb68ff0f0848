mod common;

use anyhow::Result;
use common::{month, seed_category, test_service};
use mensal::application::AppError;
use mensal::domain::{ExportLogEntry, UsageTag};

#[tokio::test]
async fn test_closed_month_rejects_all_mutations() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Moradia").await?;
    let may = month("2024-05");

    let expense = service
        .add_expense(category_id, 12000, &may, "2024-05-10", UsageTag::Fixed)
        .await?;

    service.close_month(&may).await?;

    let err = service
        .add_expense(category_id, 500, &may, "2024-05-20", UsageTag::Variable)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MonthClosed(_)));

    let err = service.mark_paid(expense.id).await.unwrap_err();
    assert!(matches!(err, AppError::MonthClosed(_)));

    let err = service.delete_expense(expense.id).await.unwrap_err();
    assert!(matches!(err, AppError::MonthClosed(_)));

    let err = service.set_income(&may, 300000).await.unwrap_err();
    assert!(matches!(err, AppError::MonthClosed(_)));

    // The failed mutations left no side effects behind
    let listed = service.list_expenses(&may).await?;
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].expense.paid);

    Ok(())
}

#[tokio::test]
async fn test_reopen_restores_mutability() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Mercado").await?;
    let may = month("2024-05");

    service.close_month(&may).await?;
    service.reopen_month(&may).await?;

    service
        .add_expense(category_id, 2500, &may, "2024-05-03", UsageTag::Variable)
        .await?;
    service.set_income(&may, 250000).await?;

    let dashboard = service.dashboard(&may).await?;
    assert!(!dashboard.closed);
    assert_eq!(dashboard.total_cents, 2500);
    assert_eq!(dashboard.income_cents, 250000);

    Ok(())
}

#[tokio::test]
async fn test_close_appends_export_log_entry() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let may = month("2024-05");

    service.close_month(&may).await?;

    let log = service.export_log(&may).await?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].status, ExportLogEntry::STATUS_EXPORTED);
    assert_eq!(log[0].month, may);
    assert!(!log[0].exported_at.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_close_is_idempotent_and_appends_per_call() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let may = month("2024-05");

    service.close_month(&may).await?;
    service.close_month(&may).await?;

    let dashboard = service.dashboard(&may).await?;
    assert!(dashboard.closed);

    // The audit trail records every close call
    let log = service.export_log(&may).await?;
    assert_eq!(log.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_reopen_without_config_row_leaves_month_open() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Lazer").await?;
    let june = month("2024-06");

    // Never written to before; reopen must not lock it up
    service.reopen_month(&june).await?;

    service
        .add_expense(category_id, 800, &june, "2024-06-15", UsageTag::Variable)
        .await?;

    let dashboard = service.dashboard(&june).await?;
    assert!(!dashboard.closed);
    assert_eq!(dashboard.income_cents, 0);

    Ok(())
}

#[tokio::test]
async fn test_lock_is_scoped_to_one_month() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Moradia").await?;
    let may = month("2024-05");
    let june = month("2024-06");

    service.close_month(&may).await?;

    // Other months stay mutable
    service
        .add_expense(category_id, 6000, &june, "2024-06-01", UsageTag::Fixed)
        .await?;
    service.set_income(&june, 100000).await?;

    Ok(())
}

#[tokio::test]
async fn test_income_last_write_wins() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let may = month("2024-05");

    service.set_income(&may, 100000).await?;
    service.set_income(&may, 300000).await?;

    let dashboard = service.dashboard(&may).await?;
    assert_eq!(dashboard.income_cents, 300000);

    Ok(())
}

#[tokio::test]
async fn test_negative_income_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let may = month("2024-05");

    let err = service.set_income(&may, -1).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    // Setting income to zero is allowed
    service.set_income(&may, 0).await?;

    Ok(())
}

#[tokio::test]
async fn test_closing_preserves_previous_income() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let may = month("2024-05");

    service.set_income(&may, 300000).await?;
    service.close_month(&may).await?;

    let dashboard = service.dashboard(&may).await?;
    assert!(dashboard.closed);
    assert_eq!(dashboard.income_cents, 300000);

    Ok(())
}
