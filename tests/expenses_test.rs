mod common;

use anyhow::Result;
use common::{month, seed_category, test_service, StandardCategories};
use mensal::application::AppError;
use mensal::domain::UsageTag;

#[tokio::test]
async fn test_add_then_list_roundtrip() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Moradia").await?;
    let may = month("2024-05");

    let expense = service
        .add_expense(category_id, 15000, &may, "2024-05-10", UsageTag::Fixed)
        .await?;
    assert!(!expense.paid);

    let listed = service.list_expenses(&may).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].expense.id, expense.id);
    assert_eq!(listed[0].expense.amount_cents, 15000);
    assert_eq!(listed[0].expense.usage_tag, UsageTag::Fixed);
    assert!(!listed[0].expense.paid);
    assert_eq!(listed[0].category, "Moradia");

    Ok(())
}

#[tokio::test]
async fn test_list_orders_by_due_date_ascending() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Mercado").await?;
    let may = month("2024-05");

    service
        .add_expense(category_id, 3000, &may, "2024-05-20", UsageTag::Variable)
        .await?;
    service
        .add_expense(category_id, 1000, &may, "2024-05-05", UsageTag::Variable)
        .await?;
    service
        .add_expense(category_id, 2000, &may, "2024-05-12", UsageTag::Variable)
        .await?;

    let listed = service.list_expenses(&may).await?;
    let due_dates: Vec<&str> = listed
        .iter()
        .map(|row| row.expense.due_date.as_str())
        .collect();
    assert_eq!(due_dates, vec!["2024-05-05", "2024-05-12", "2024-05-20"]);

    Ok(())
}

#[tokio::test]
async fn test_list_is_partitioned_by_month() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Lazer").await?;

    let may = month("2024-05");
    let june = month("2024-06");
    service
        .add_expense(category_id, 5000, &may, "2024-05-01", UsageTag::Variable)
        .await?;
    service
        .add_expense(category_id, 7000, &june, "2024-06-01", UsageTag::Variable)
        .await?;

    let may_rows = service.list_expenses(&may).await?;
    assert_eq!(may_rows.len(), 1);
    assert_eq!(may_rows[0].expense.amount_cents, 5000);

    let june_rows = service.list_expenses(&june).await?;
    assert_eq!(june_rows.len(), 1);
    assert_eq!(june_rows[0].expense.amount_cents, 7000);

    Ok(())
}

#[tokio::test]
async fn test_mark_paid_is_idempotent() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Moradia").await?;
    let may = month("2024-05");

    let expense = service
        .add_expense(category_id, 9000, &may, "2024-05-15", UsageTag::Fixed)
        .await?;

    service.mark_paid(expense.id).await?;
    // Second application is harmless
    service.mark_paid(expense.id).await?;

    let listed = service.list_expenses(&may).await?;
    assert!(listed[0].expense.paid);

    Ok(())
}

#[tokio::test]
async fn test_mark_paid_missing_expense_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.mark_paid(9999).await.unwrap_err();
    assert!(matches!(err, AppError::ExpenseNotFound(9999)));

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_expense() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Mercado").await?;
    let may = month("2024-05");

    let expense = service
        .add_expense(category_id, 4000, &may, "2024-05-08", UsageTag::Variable)
        .await?;
    service.delete_expense(expense.id).await?;

    assert!(service.list_expenses(&may).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_expense_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.delete_expense(424242).await.unwrap_err();
    assert!(matches!(err, AppError::ExpenseNotFound(424242)));

    Ok(())
}

#[tokio::test]
async fn test_add_expense_requires_existing_category() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let may = month("2024-05");

    let err = service
        .add_expense(77, 1000, &may, "2024-05-01", UsageTag::Fixed)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound(77)));

    Ok(())
}

#[tokio::test]
async fn test_add_expense_rejects_non_positive_amount() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let category_id = seed_category(&service, "Moradia").await?;
    let may = month("2024-05");

    for amount in [0, -500] {
        let err = service
            .add_expense(category_id, amount, &may, "2024-05-01", UsageTag::Fixed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
    }
    assert!(service.list_expenses(&may).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_category_name_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_category(&service, "Moradia").await?;

    let err = service.add_category("Moradia").await.unwrap_err();
    assert!(matches!(err, AppError::CategoryAlreadyExists(_)));

    Ok(())
}

#[tokio::test]
async fn test_categories_are_listed_by_name() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let categories = StandardCategories::create_basic(&service).await?;

    let listed = service.list_categories().await?;
    let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Lazer", "Mercado", "Moradia"]);
    assert!(listed.iter().any(|c| c.id == categories.housing));

    Ok(())
}
