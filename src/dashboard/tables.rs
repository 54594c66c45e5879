//! Tables for the transaction listings and the recent budget entries.

use maud::{Markup, html};

use crate::{
    BudgetEntry, Transaction,
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, date_cell,
        edit_delete_action_links, format_currency, link,
    },
};

const AMOUNT_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";

/// Renders `transactions` as a table, newest first.
///
/// Edit and delete controls are shown only on the rows owned by
/// `current_username`.
pub(super) fn transaction_table(transactions: &[Transaction], current_username: &str) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Card" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Recorded by" }
                        th scope="col" class=(AMOUNT_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction, transaction.owner_username == current_username))
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="7" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No transactions yet. "
                                (link(endpoints::NEW_TRANSACTION_VIEW, "Record one"))
                                " to get started."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, is_owner: bool) -> Markup {
    let view_url = format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);
    let owner_url = format_endpoint(
        endpoints::USER_TRANSACTIONS_VIEW,
        &transaction.owner_username,
    );

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (date_cell(transaction.date)) }
            td class=(TABLE_CELL_STYLE)
            {
                a href=(view_url) class=(LINK_STYLE) { (transaction.description) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (transaction.card_name) }
            td class=(TABLE_CELL_STYLE) { (link(&owner_url, &transaction.owner_username)) }
            td class=(AMOUNT_CELL_STYLE) { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                @if is_owner {
                    (edit_delete_action_links(
                        &format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
                        &format_endpoint(endpoints::TRANSACTION_API, transaction.id),
                        "Are you sure you want to delete this transaction?",
                        "closest tr",
                        "delete",
                    ))
                }
            }
        }
    }
}

/// Renders the most recent budget entries as a list.
pub(super) fn budget_entry_list(entries: &[BudgetEntry]) -> Markup {
    html! {
        div id="recent-budget-entries" class="rounded-lg shadow bg-white dark:bg-gray-800 p-4"
        {
            h3 class="text-lg font-semibold mb-2" { "Recent budget entries" }

            @if entries.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Nothing added yet. "
                    (link(endpoints::NEW_BUDGET_VIEW, "Add to the budget"))
                    "."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for entry in entries {
                        li class="flex justify-between py-2"
                        {
                            a
                                href=(format_endpoint(endpoints::BUDGET_VIEW, entry.id))
                                class=(LINK_STYLE)
                            {
                                (date_cell(entry.added_date))
                            }

                            span class="font-medium" { (format_currency(entry.amount_added)) }
                        }
                    }
                }
            }
        }
    }
}
