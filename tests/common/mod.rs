use myfinapp_core::budgets::Budget;
use myfinapp_core::transactions::Transaction;

pub fn transaction(id: &str, amount: &str, category: &str, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        description: id.to_string(),
        amount: amount.to_string(),
        currency: "AED".to_string(),
        category: category.to_string(),
        month: date[..7].to_string(),
        income_type: "not_applicable".to_string(),
        expense_type: "not_applicable".to_string(),
        is_non_cashflow: false,
        source_id: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub fn budget(id: &str, category: &str, month: &str, amount: &str) -> Budget {
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
