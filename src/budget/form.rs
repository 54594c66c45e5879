//! The form shared by the add and edit budget entry pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The form data for adding or editing a budget entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetForm {
    /// How much money was added to the budget, in dollars.
    pub amount_added: f64,
    /// When the money was added.
    pub added_date: Date,
}

impl BudgetForm {
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if the amount is zero, infinite or NaN.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.amount_added.is_finite() || self.amount_added == 0.0 {
            return Err(Error::InvalidAmount);
        }

        Ok(())
    }
}

/// The amount and date input fields, pre-filled with `amount` and `date`.
pub fn budget_form_fields(amount: Option<f64>, date: Date) -> Markup {
    let amount_str = amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label
                for="amount_added"
                class=(FORM_LABEL_STYLE)
            {
                "Amount added"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount_added"
                    id="amount_added"
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
                for="added_date"
                class=(FORM_LABEL_STYLE)
            {
                "Date added"
            }

            input
                name="added_date"
                id="added_date"
                type="date"
                value=(date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use time::macros::date;

    use crate::{
        Error,
        test_utils::{assert_form_input, assert_form_input_with_value, must_get_form},
    };

    use super::{BudgetForm, budget_form_fields};

    #[test]
    fn validate_rejects_zero_and_non_finite_amounts() {
        for amount_added in [0.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let form = BudgetForm {
                amount_added,
                added_date: date!(2025 - 10 - 02),
            };

            assert_eq!(
                form.validate(),
                Err(Error::InvalidAmount),
                "amount {amount_added} should be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_future_dates() {
        let form = BudgetForm {
            amount_added: 250.0,
            added_date: date!(2999 - 01 - 01),
        };

        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn non_finite_amounts_parse_from_form_data() {
        let form: BudgetForm =
            serde_urlencoded::from_str("amount_added=inf&added_date=2025-01-01").unwrap();

        assert_eq!(form.validate(), Err(Error::InvalidAmount));
    }

    #[test]
    fn prefills_amount_and_date() {
        let markup = maud::html! {
            form { (budget_form_fields(Some(120.5), date!(2025 - 10 - 02))) }
        };

        let document = Html::parse_document(&markup.into_string());
        let form = must_get_form(&document);
        assert_form_input_with_value(&form, "amount_added", "number", "120.50");
        assert_form_input_with_value(&form, "added_date", "date", "2025-10-02");
    }

    #[test]
    fn amount_is_empty_for_new_entry() {
        let markup = maud::html! {
            form { (budget_form_fields(None, date!(2025 - 10 - 05))) }
        };

        let document = Html::parse_document(&markup.into_string());
        let form = must_get_form(&document);
        assert_form_input(&form, "amount_added", "number");
        assert_form_input_with_value(&form, "added_date", "date", "2025-10-05");
    }
}
