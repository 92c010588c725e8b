// Copyright (c) 2025 Spendlog contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn date_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("YYYY-MM-DD").help(help)
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .about("Expense ledger, category budgets, and recurring charges")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Path to the SQLite store (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the store and print its path"))
        .subcommand(expense_cmd())
        .subcommand(report_cmd())
        .subcommand(budget_cmd())
        .subcommand(recurring_cmd())
        .subcommand(export_cmd())
        .subcommand(import_cmd())
        .subcommand(json_args(
            Command::new("categories").about("Print the advisory category list"),
        ))
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Record and query ledger entries")
        .subcommand(
            Command::new("add")
                .about("Add one expense")
                .arg(date_arg("date", "Transaction date").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("subcategory").long("subcategory").default_value(""))
                .arg(Arg::new("note").long("note").default_value("")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List expenses in an inclusive date range")
                .arg(date_arg("from", "Range start").required(true))
                .arg(date_arg("to", "Range end").required(true)),
        ))
        .subcommand(json_args(
            Command::new("search")
                .about("Keyword search over category, subcategory, and note")
                .arg(Arg::new("keyword").required(true))
                .arg(date_arg("from", "Optional range start"))
                .arg(date_arg("to", "Optional range end")),
        ))
        .subcommand(json_args(
            Command::new("get")
                .about("Fetch one expense by id")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        ))
        .subcommand(
            Command::new("update")
                .about("Update provided fields of an expense; the rest stay put")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(date_arg("date", "New date"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("subcategory").long("subcategory"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an expense by id")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregate views over the ledger")
        .subcommand(json_args(
            Command::new("summary")
                .about("Per-category totals for a range")
                .arg(date_arg("from", "Range start").required(true))
                .arg(date_arg("to", "Range end").required(true))
                .arg(Arg::new("category").long("category").help("Limit to one category")),
        ))
        .subcommand(json_args(
            Command::new("monthly")
                .about("Month breakdown (or all months of a year)")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .required(true)
                        .value_parser(value_parser!(i32)),
                )
                .arg(Arg::new("month").long("month").value_parser(value_parser!(u32))),
        ))
        .subcommand(json_args(
            Command::new("top")
                .about("Highest-amount expenses in a range")
                .arg(date_arg("from", "Range start").required(true))
                .arg(date_arg("to", "Range end").required(true))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .default_value("10")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_args(
            Command::new("stats")
                .about("Statistics for a range")
                .arg(date_arg("from", "Range start").required(true))
                .arg(date_arg("to", "Range end").required(true)),
        ))
        .subcommand(json_args(
            Command::new("trend")
                .about("Spend trend for one category (weeks are approximate across year ends)")
                .arg(Arg::new("category").long("category").required(true))
                .arg(date_arg("from", "Range start").required(true))
                .arg(date_arg("to", "Range end").required(true))
                .arg(
                    Arg::new("group-by")
                        .long("group-by")
                        .default_value("month")
                        .help("day, week, or month"),
                ),
        ))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Category spending limits")
        .subcommand(
            Command::new("add")
                .about("Create a budget")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("period")
                        .long("period")
                        .required(true)
                        .help("weekly, monthly, or yearly (descriptive only)"),
                )
                .arg(date_arg("start", "Budget start date").required(true))
                .arg(date_arg("end", "Optional budget end date")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List budgets, newest first")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include deactivated budgets"),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Update amount, active flag, or end date")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("amount").long("amount"))
                .arg(
                    Arg::new("active")
                        .long("active")
                        .value_parser(value_parser!(bool)),
                )
                .arg(date_arg("end", "New end date")),
        )
        .subcommand(json_args(
            Command::new("status")
                .about("Spend vs limit for all active budgets over a window")
                .arg(date_arg("from", "Window start").required(true))
                .arg(date_arg("to", "Window end").required(true)),
        ))
}

fn recurring_cmd() -> Command {
    Command::new("recurring")
        .about("Recurring charges and subscriptions")
        .subcommand(
            Command::new("add")
                .about("Add a recurring definition")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("subcategory").long("subcategory").default_value(""))
                .arg(
                    Arg::new("frequency")
                        .long("frequency")
                        .required(true)
                        .help("weekly, monthly, or yearly"),
                )
                .arg(date_arg("due", "First due date").required(true))
                .arg(Arg::new("note").long("note").default_value("")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List recurring definitions by next due date")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include deactivated definitions"),
                ),
        ))
        .subcommand(json_args(
            Command::new("due")
                .about("Definitions due within a look-ahead window")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .default_value("7")
                        .value_parser(value_parser!(i64)),
                )
                .arg(date_arg("as-of", "Treat this date as today")),
        ))
        .subcommand(
            Command::new("process")
                .about("Materialize a due charge and advance its schedule")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(date_arg("date", "Processing date (defaults to today)")),
        )
        .subcommand(
            Command::new("activate")
                .about("Reactivate a definition")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("deactivate")
                .about("Stop a definition without deleting it")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
}

fn export_cmd() -> Command {
    Command::new("export").about("Export ledger data").subcommand(
        Command::new("expenses")
            .about("Write a date range to CSV")
            .arg(date_arg("from", "Range start").required(true))
            .arg(date_arg("to", "Range end").required(true))
            .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
    )
}

fn import_cmd() -> Command {
    Command::new("import").about("Import ledger data").subcommand(
        Command::new("expenses")
            .about("Bulk-insert expenses from CSV (date,amount,category,subcategory,note)")
            .arg(Arg::new("path").long("path").required(true).value_name("PATH")),
    )
}
