//! The form fields and validation shared by the create and edit transaction pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::{Transaction, TransactionBuilder},
};

/// The form data for creating or editing a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// What kind of spending this was.
    pub category: String,
    /// The card the transaction was paid with.
    pub card_name: String,
}

impl TransactionForm {
    /// Check the amount, then trim the text fields and check that none of them are empty.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if the amount is zero, infinite or NaN,
    /// or [Error::EmptyField] naming the first empty field.
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        if !self.amount.is_finite() || self.amount == 0.0 {
            return Err(Error::InvalidAmount);
        }

        let description = non_empty(&self.description, "description")?;
        let category = non_empty(&self.category, "category")?;
        let card_name = non_empty(&self.card_name, "card name")?;

        Ok(Transaction::build(self.amount, self.date, description)
            .category(category)
            .card_name(card_name))
    }
}

fn non_empty<'a>(text: &'a str, field_name: &'static str) -> Result<&'a str, Error> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        Err(Error::EmptyField(field_name))
    } else {
        Ok(trimmed)
    }
}

/// The values to pre-fill the transaction form with.
pub struct TransactionFormDefaults<'a> {
    pub amount: Option<f64>,
    pub date: Date,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub card_name: Option<&'a str>,
}

impl<'a> TransactionFormDefaults<'a> {
    /// Defaults for a new transaction dated `today`.
    pub fn empty(today: Date) -> Self {
        Self {
            amount: None,
            date: today,
            description: None,
            category: None,
            card_name: None,
        }
    }

    /// Defaults that show the current details of `transaction`.
    pub fn from_transaction(transaction: &'a Transaction) -> Self {
        Self {
            amount: Some(transaction.amount),
            date: transaction.date,
            description: Some(&transaction.description),
            category: Some(&transaction.category),
            card_name: Some(&transaction.card_name),
        }
    }
}

fn text_field(name: &str, label: &str, placeholder: &str, value: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for=(name)
                class=(FORM_LABEL_STYLE)
            {
                (label)
            }

            input
                name=(name)
                id=(name)
                type="text"
                placeholder=(placeholder)
                value=[value]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    required
                    autofocus
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (text_field("description", "Description", "Weekly shop", defaults.description))
        (text_field("category", "Category", "Groceries", defaults.category))
        (text_field("card_name", "Card name", "Visa", defaults.card_name))
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use time::macros::date;

    use crate::{
        Error,
        test_utils::{assert_form_input, assert_form_input_with_value, must_get_form},
        transaction::Transaction,
    };

    use super::{TransactionForm, TransactionFormDefaults, transaction_form_fields};

    fn form(description: &str, category: &str, card_name: &str) -> TransactionForm {
        form_with_amount(12.5, description, category, card_name)
    }

    fn form_with_amount(
        amount: f64,
        description: &str,
        category: &str,
        card_name: &str,
    ) -> TransactionForm {
        TransactionForm {
            amount,
            date: date!(2025 - 10 - 05),
            description: description.to_owned(),
            category: category.to_owned(),
            card_name: card_name.to_owned(),
        }
    }

    #[test]
    fn validate_trims_text_fields() {
        let builder = form("  Lunch ", " Food", "Visa  ").validate().unwrap();

        assert_eq!(
            builder,
            Transaction::build(12.5, date!(2025 - 10 - 05), "Lunch")
                .category("Food")
                .card_name("Visa")
        );
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert_eq!(
            form("   ", "Food", "Visa").validate(),
            Err(Error::EmptyField("description"))
        );
        assert_eq!(
            form("Lunch", "", "Visa").validate(),
            Err(Error::EmptyField("category"))
        );
        assert_eq!(
            form("Lunch", "Food", "\t").validate(),
            Err(Error::EmptyField("card name"))
        );
    }

    #[test]
    fn validate_rejects_zero_and_non_finite_amounts() {
        for amount in [0.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(
                form_with_amount(amount, "Lunch", "Food", "Visa").validate(),
                Err(Error::InvalidAmount),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_refunds() {
        let builder = form_with_amount(-20.0, "Refund", "Food", "Visa")
            .validate()
            .unwrap();

        assert_eq!(
            builder,
            Transaction::build(-20.0, date!(2025 - 10 - 05), "Refund")
                .category("Food")
                .card_name("Visa")
        );
    }

    #[test]
    fn non_finite_amounts_parse_from_form_data() {
        let form: TransactionForm = serde_urlencoded::from_str(
            "amount=inf&date=2025-10-05&description=Lunch&category=Food&card_name=Visa",
        )
        .unwrap();

        assert_eq!(form.validate(), Err(Error::InvalidAmount));
    }

    #[test]
    fn fields_are_prefilled_from_transaction() {
        let transaction = Transaction {
            id: 1,
            owner_username: "alice".to_owned(),
            amount: 3.5,
            date: date!(2025 - 10 - 01),
            description: "Coffee".to_owned(),
            category: "Food".to_owned(),
            card_name: "Visa".to_owned(),
        };
        let defaults = TransactionFormDefaults::from_transaction(&transaction);
        let markup = maud::html! { form { (transaction_form_fields(&defaults)) } };

        let document = Html::parse_document(&markup.into_string());
        let form = must_get_form(&document);
        assert_form_input_with_value(&form, "amount", "number", "3.50");
        assert_form_input_with_value(&form, "date", "date", "2025-10-01");
        assert_form_input_with_value(&form, "description", "text", "Coffee");
        assert_form_input_with_value(&form, "category", "text", "Food");
        assert_form_input_with_value(&form, "card_name", "text", "Visa");
    }

    #[test]
    fn empty_fields_default_to_today() {
        let defaults = TransactionFormDefaults::empty(date!(2025 - 10 - 05));
        let markup = maud::html! { form { (transaction_form_fields(&defaults)) } };

        let document = Html::parse_document(&markup.into_string());
        let form = must_get_form(&document);
        assert_form_input_with_value(&form, "date", "date", "2025-10-05");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "description", "text");
    }

    #[test]
    fn date_input_allows_future_dates() {
        let defaults = TransactionFormDefaults::empty(date!(2025 - 10 - 05));
        let markup = maud::html! { form { (transaction_form_fields(&defaults)) } };

        let document = Html::parse_document(&markup.into_string());
        let selector = scraper::Selector::parse("input[name=date]").unwrap();
        let input = document.select(&selector).next().expect("no date input");
        assert_eq!(input.value().attr("max"), None);
    }
}
