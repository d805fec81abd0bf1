use chrono::{Datelike, Utc};
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::budgets::budgets_service::dedupe_by_category;
use crate::budgets::BudgetRepositoryTrait;
use crate::constants::{
    DEFAULT_CURRENCY, DISPLAY_DECIMAL_PRECISION, NON_CASHFLOW_EXPENSE_CATEGORY,
    NON_CASHFLOW_INCOME_CATEGORY,
};
use crate::errors::Result;
use crate::reports::reports_engine::{
    compute_summary, filter_for_month, group_by_week, month_over_month_change, non_cashflow_totals,
    partition_cashflow, spending_by_category, weekly_totals, SparklineSeries,
};
use crate::reports::reports_model::{
    AccountFilter, BudgetProgress, CategoryHistoryEntry, CategoryReport, CategorySummaryReport,
    ClassificationFilter, MonthlyReport, NonCashflowReport, TrendEntry,
};
use crate::reports::reports_traits::ReportsServiceTrait;
use crate::transactions::{Transaction, TransactionFilters, TransactionRepositoryTrait};

/// The most recent `months_back` month keys, newest first, including the
/// current month.
pub fn recent_month_keys(months_back: u32) -> Vec<String> {
    let today = Utc::now().date_naive();
    let mut year = today.year();
    let mut month = today.month() as i32;

    let mut keys = Vec::with_capacity(months_back as usize);
    for _ in 0..months_back {
        keys.push(format!("{:04}-{:02}", year, month));
        month -= 1;
        if month == 0 {
            month = 12;
            year -= 1;
        }
    }
    keys
}

pub struct ReportsService<T: TransactionRepositoryTrait, B: BudgetRepositoryTrait> {
    transaction_repo: Arc<T>,
    budget_repo: Arc<B>,
}

impl<T: TransactionRepositoryTrait, B: BudgetRepositoryTrait> ReportsService<T, B> {
    pub fn new(transaction_repo: Arc<T>, budget_repo: Arc<B>) -> Self {
        ReportsService {
            transaction_repo,
            budget_repo,
        }
    }

    fn month_spending(&self, category: &str, month: &str) -> Result<Decimal> {
        let filters = TransactionFilters {
            month: Some(month.to_string()),
            category: Some(category.to_string()),
            source_id: None,
        };
        let transactions = self.transaction_repo.list(&filters)?;
        Ok(spending_by_category(&transactions, category))
    }

    fn month_budget(&self, category: &str, month: &str) -> Result<Decimal> {
        let budgets = dedupe_by_category(self.budget_repo.list_for_month(month)?);
        Ok(budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount_decimal())
            .unwrap_or(Decimal::ZERO))
    }
}

impl<T, B> ReportsServiceTrait for ReportsService<T, B>
where
    T: TransactionRepositoryTrait,
    B: BudgetRepositoryTrait,
{
    fn get_monthly_report(
        &self,
        month: &str,
        account: &AccountFilter,
        income_filter: &ClassificationFilter,
        expense_filter: &ClassificationFilter,
    ) -> Result<MonthlyReport> {
        debug!("Building monthly report for {}", month);

        let all = self
            .transaction_repo
            .list(&TransactionFilters::for_month(month))?;
        let scoped = filter_for_month(&all, month, account);
        let currency = scoped
            .first()
            .map(|t| t.currency.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let partition = partition_cashflow(scoped);
        let summary = compute_summary(&partition.cashflow, income_filter, expense_filter).rounded();

        let budgets = dedupe_by_category(self.budget_repo.list_for_month(month)?);
        let mut categories: Vec<CategoryReport> = budgets
            .iter()
            .map(|budget| {
                let spent = spending_by_category(&partition.cashflow, &budget.category);
                let for_category: Vec<Transaction> = partition
                    .cashflow
                    .iter()
                    .filter(|t| t.category == budget.category)
                    .cloned()
                    .collect();
                CategoryReport {
                    progress: BudgetProgress::for_budget(budget, spent),
                    weeks: group_by_week(&for_category),
                }
            })
            .collect();
        categories.sort_by(|a, b| b.progress.spent.cmp(&a.progress.spent));

        let ncf_income: Vec<Transaction> = partition
            .non_cashflow
            .iter()
            .filter(|t| t.category == NON_CASHFLOW_INCOME_CATEGORY)
            .cloned()
            .collect();
        let ncf_expense: Vec<Transaction> = partition
            .non_cashflow
            .iter()
            .filter(|t| t.category == NON_CASHFLOW_EXPENSE_CATEGORY)
            .cloned()
            .collect();
        let non_cashflow = NonCashflowReport {
            totals: non_cashflow_totals(&partition.non_cashflow).rounded(),
            income_weeks: group_by_week(&ncf_income),
            expense_weeks: group_by_week(&ncf_expense),
        };

        // Sparklines follow the active filters, like the headline numbers.
        let filtered_income: Vec<Transaction> = partition
            .cashflow
            .iter()
            .filter(|t| income_filter.matches(t.income_classification()))
            .cloned()
            .collect();
        let filtered_expense: Vec<Transaction> = partition
            .cashflow
            .iter()
            .filter(|t| expense_filter.matches(t.expense_classification()))
            .cloned()
            .collect();
        let weekly_income = weekly_totals(&filtered_income, SparklineSeries::Income);
        let weekly_expenses = weekly_totals(&filtered_expense, SparklineSeries::Expense);
        let weekly_net: Vec<Decimal> = weekly_income
            .iter()
            .zip(weekly_expenses.iter())
            .map(|(income, expense)| income - expense)
            .collect();

        Ok(MonthlyReport {
            month: month.to_string(),
            currency,
            summary,
            categories,
            non_cashflow,
            weekly_income,
            weekly_expenses,
            weekly_net,
        })
    }

    fn get_category_history(
        &self,
        category: &str,
        months: &[String],
    ) -> Result<Vec<CategoryHistoryEntry>> {
        let mut spent_by_month = Vec::with_capacity(months.len());
        for month in months {
            spent_by_month.push(self.month_spending(category, month)?);
        }

        let mut history = Vec::with_capacity(months.len());
        for (index, month) in months.iter().enumerate() {
            let spent = spent_by_month[index];
            // Months are ordered newest first, so the previous month is the
            // next entry; the oldest month has no baseline.
            let previous = spent_by_month.get(index + 1).copied().unwrap_or(Decimal::ZERO);

            history.push(CategoryHistoryEntry {
                month: month.clone(),
                spent: spent.round_dp(DISPLAY_DECIMAL_PRECISION),
                budget: self.month_budget(category, month)?,
                change: month_over_month_change(spent, previous),
            });
        }
        Ok(history)
    }

    fn get_trends(
        &self,
        start_month: Option<&str>,
        end_month: Option<&str>,
    ) -> Result<Vec<TrendEntry>> {
        let all = self.transaction_repo.list(&TransactionFilters::default())?;

        let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        for transaction in &all {
            if transaction.is_non_cashflow {
                continue;
            }
            if start_month.map_or(false, |start| transaction.month.as_str() < start) {
                continue;
            }
            if end_month.map_or(false, |end| transaction.month.as_str() > end) {
                continue;
            }

            let entry = by_month.entry(transaction.month.clone()).or_default();
            let amount = transaction.amount_decimal();
            if amount > Decimal::ZERO {
                entry.0 += amount;
            } else if amount < Decimal::ZERO {
                entry.1 += amount.abs();
            }
        }

        Ok(by_month
            .into_iter()
            .map(|(month, (income, expense))| TrendEntry {
                month,
                income: income.round_dp(DISPLAY_DECIMAL_PRECISION),
                expense: expense.round_dp(DISPLAY_DECIMAL_PRECISION),
            })
            .collect())
    }

    fn get_summary_by_category(
        &self,
        month: &str,
        account: &AccountFilter,
    ) -> Result<CategorySummaryReport> {
        let all = self
            .transaction_repo
            .list(&TransactionFilters::for_month(month))?;
        let scoped = filter_for_month(&all, month, account);

        let mut report = CategorySummaryReport::default();
        for transaction in &scoped {
            let amount = transaction.amount_decimal();
            *report
                .total_by_category
                .entry(transaction.category.clone())
                .or_default() += amount;

            if transaction.is_non_cashflow {
                continue;
            }
            if amount > Decimal::ZERO {
                report.total_income += amount;
            } else if amount < Decimal::ZERO {
                report.total_expense += amount.abs();
            }
        }

        for value in report.total_by_category.values_mut() {
            *value = value.round_dp(DISPLAY_DECIMAL_PRECISION);
        }
        report.total_income = report.total_income.round_dp(DISPLAY_DECIMAL_PRECISION);
        report.total_expense = report.total_expense.round_dp(DISPLAY_DECIMAL_PRECISION);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::{Budget, NewBudget};
    use crate::reports::reports_model::ChangeDirection;
    use crate::transactions::NewTransaction;
    use rust_decimal_macros::dec;

    struct InMemoryTransactions {
        rows: Vec<Transaction>,
    }

    impl TransactionRepositoryTrait for InMemoryTransactions {
        fn list(&self, filters: &TransactionFilters) -> Result<Vec<Transaction>> {
            Ok(self
                .rows
                .iter()
                .filter(|t| filters.month.as_ref().map_or(true, |m| &t.month == m))
                .filter(|t| filters.category.as_ref().map_or(true, |c| &t.category == c))
                .filter(|t| {
                    filters
                        .source_id
                        .as_ref()
                        .map_or(true, |s| t.source_id.as_ref() == Some(s))
                })
                .cloned()
                .collect())
        }

        fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
            self.rows
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned()
                .ok_or_else(|| {
                    crate::transactions::TransactionError::NotFound(transaction_id.to_string())
                        .into()
                })
        }

        fn create(&self, _new_transaction: NewTransaction) -> Result<Transaction> {
            unimplemented!("not needed for report tests")
        }

        fn update(&self, transaction: Transaction) -> Result<Transaction> {
            Ok(transaction)
        }

        fn delete(&self, _transaction_id: &str) -> Result<usize> {
            unimplemented!("not needed for report tests")
        }
    }

    struct InMemoryBudgets {
        rows: Vec<Budget>,
    }

    impl BudgetRepositoryTrait for InMemoryBudgets {
        fn list_for_month(&self, month: &str) -> Result<Vec<Budget>> {
            Ok(self
                .rows
                .iter()
                .filter(|b| b.month == month)
                .cloned()
                .collect())
        }

        fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
            self.rows
                .iter()
                .find(|b| b.id == budget_id)
                .cloned()
                .ok_or_else(|| crate::budgets::BudgetError::NotFound(budget_id.to_string()).into())
        }

        fn create(&self, _new_budget: NewBudget) -> Result<Budget> {
            unimplemented!("not needed for report tests")
        }

        fn update(&self, budget: Budget) -> Result<Budget> {
            Ok(budget)
        }

        fn delete(&self, _budget_id: &str) -> Result<usize> {
            unimplemented!("not needed for report tests")
        }
    }

    fn tx(id: &str, amount: &str, category: &str, date: &str, income_type: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            description: String::new(),
            amount: amount.to_string(),
            currency: "AED".to_string(),
            category: category.to_string(),
            month: date[..7].to_string(),
            income_type: income_type.to_string(),
            expense_type: "not_applicable".to_string(),
            is_non_cashflow: matches!(
                category,
                "non_cashflow_income" | "non_cashflow_expense"
            ),
            source_id: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn budget(id: &str, category: &str, month: &str, amount: &str) -> Budget {
        Budget {
            id: id.to_string(),
            category: category.to_string(),
            month: month.to_string(),
            amount: amount.to_string(),
            currency: "AED".to_string(),
            color: None,
            icon: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn service(
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
    ) -> ReportsService<InMemoryTransactions, InMemoryBudgets> {
        ReportsService::new(
            Arc::new(InMemoryTransactions { rows: transactions }),
            Arc::new(InMemoryBudgets { rows: budgets }),
        )
    }

    #[test]
    fn monthly_report_matches_dashboard_scenario() {
        let svc = service(
            vec![
                tx("t1", "1000", "income", "2024-06-01", "expected"),
                tx("t2", "-200", "groceries", "2024-06-05", "not_applicable"),
                tx("t3", "-50", "non_cashflow_expense", "2024-06-09", "not_applicable"),
            ],
            vec![budget("b1", "groceries", "2024-06", "150")],
        );

        let report = svc
            .get_monthly_report(
                "2024-06",
                &AccountFilter::All,
                &ClassificationFilter::All,
                &ClassificationFilter::All,
            )
            .unwrap();

        assert_eq!(report.summary.income, dec!(1000));
        assert_eq!(report.summary.expenses, dec!(200));
        assert_eq!(report.summary.balance, dec!(800));
        assert_eq!(report.non_cashflow.totals.expense, dec!(50));

        let groceries = &report.categories[0];
        assert_eq!(groceries.progress.spent, dec!(200));
        assert_eq!(groceries.progress.percent_used, dec!(100));
        assert!(groceries.progress.is_over_budget);
        assert_eq!(groceries.progress.remaining_amount, dec!(-50));
        assert_eq!(groceries.weeks[&1].total_amount, dec!(-200));
    }

    #[test]
    fn monthly_report_rounds_money_for_display() {
        let svc = service(
            vec![
                tx("t1", "100.004", "income", "2024-06-01", "expected"),
                tx("t2", "-0.006", "dining", "2024-06-02", "not_applicable"),
            ],
            vec![budget("b1", "dining", "2024-06", "10")],
        );

        let report = svc
            .get_monthly_report(
                "2024-06",
                &AccountFilter::All,
                &ClassificationFilter::All,
                &ClassificationFilter::All,
            )
            .unwrap();

        assert_eq!(report.summary.income, dec!(100.00));
        assert_eq!(report.summary.expenses, dec!(0.01));
        assert_eq!(report.summary.balance, dec!(99.99));
        assert_eq!(report.categories[0].progress.spent, dec!(0.01));
    }

    #[test]
    fn categories_sorted_by_spent_descending() {
        let svc = service(
            vec![
                tx("t1", "-30", "dining", "2024-06-02", "not_applicable"),
                tx("t2", "-500", "housing", "2024-06-03", "not_applicable"),
            ],
            vec![
                budget("b1", "dining", "2024-06", "100"),
                budget("b2", "housing", "2024-06", "1000"),
            ],
        );

        let report = svc
            .get_monthly_report(
                "2024-06",
                &AccountFilter::All,
                &ClassificationFilter::All,
                &ClassificationFilter::All,
            )
            .unwrap();

        let order: Vec<&str> = report
            .categories
            .iter()
            .map(|c| c.progress.category.as_str())
            .collect();
        assert_eq!(order, vec!["housing", "dining"]);
    }

    #[test]
    fn duplicate_budget_rows_do_not_crash_the_report() {
        let svc = service(
            vec![tx("t1", "-20", "dining", "2024-06-02", "not_applicable")],
            vec![
                budget("b1", "dining", "2024-06", "100"),
                budget("b2", "dining", "2024-06", "250"),
            ],
        );

        let report = svc
            .get_monthly_report(
                "2024-06",
                &AccountFilter::All,
                &ClassificationFilter::All,
                &ClassificationFilter::All,
            )
            .unwrap();

        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].progress.budgeted, dec!(250));
    }

    #[test]
    fn category_history_orders_changes_newest_first() {
        let svc = service(
            vec![
                tx("t1", "-150", "groceries", "2024-06-10", "not_applicable"),
                tx("t2", "-100", "groceries", "2024-05-12", "not_applicable"),
            ],
            vec![budget("b1", "groceries", "2024-06", "200")],
        );

        let months = vec!["2024-06".to_string(), "2024-05".to_string()];
        let history = svc.get_category_history("groceries", &months).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].spent, dec!(150));
        assert_eq!(history[0].budget, dec!(200));
        assert_eq!(history[0].change.change_percent, 50);
        assert_eq!(history[0].change.change_direction, ChangeDirection::Up);
        // Oldest month has no baseline.
        assert_eq!(history[1].change.change_percent, 0);
        assert_eq!(history[1].change.change_direction, ChangeDirection::Same);
    }

    #[test]
    fn trends_are_sorted_by_month_and_skip_non_cashflow() {
        let svc = service(
            vec![
                tx("t1", "900", "income", "2024-06-01", "expected"),
                tx("t2", "-300", "dining", "2024-05-02", "not_applicable"),
                tx("t3", "400", "income", "2024-05-03", "expected"),
                tx("t4", "9999", "non_cashflow_income", "2024-06-04", "not_applicable"),
            ],
            vec![],
        );

        let trends = svc.get_trends(None, None).unwrap();
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].month, "2024-05");
        assert_eq!(trends[0].income, dec!(400));
        assert_eq!(trends[0].expense, dec!(300));
        assert_eq!(trends[1].month, "2024-06");
        assert_eq!(trends[1].income, dec!(900));

        let bounded = svc.get_trends(Some("2024-06"), None).unwrap();
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].month, "2024-06");
    }

    #[test]
    fn summary_by_category_keeps_signed_totals() {
        let svc = service(
            vec![
                tx("t1", "1000", "income", "2024-06-01", "expected"),
                tx("t2", "-200", "groceries", "2024-06-05", "not_applicable"),
                tx("t3", "-100", "groceries", "2024-06-07", "not_applicable"),
            ],
            vec![],
        );

        let report = svc
            .get_summary_by_category("2024-06", &AccountFilter::All)
            .unwrap();
        assert_eq!(report.total_by_category["groceries"], dec!(-300));
        assert_eq!(report.total_by_category["income"], dec!(1000));
        assert_eq!(report.total_income, dec!(1000));
        assert_eq!(report.total_expense, dec!(300));
    }

    #[test]
    fn recent_month_keys_are_contiguous() {
        let keys = recent_month_keys(3);
        assert_eq!(keys.len(), 3);
        for key in &keys {
            assert_eq!(key.len(), 7);
            assert_eq!(&key[4..5], "-");
        }
    }
}
