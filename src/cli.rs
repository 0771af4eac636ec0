// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn snapshot_args(cmd: Command) -> Command {
    cmd.arg(arg!(--input <FILE> "Read transactions, categories and budgets from a JSON file"))
        .arg(arg!(--"as-of" <DATE> "Reference date YYYY-MM-DD (default: today)"))
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("income or expense")
}

pub fn build_cli() -> Command {
    Command::new("budgetlens")
        .about("Personal finance dashboard, budgets and spending insights")
        .version(clap::crate_version!())
        .subcommand(
            Command::new("config")
                .about("API connection settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-url").arg(arg!(<url> "Base URL of the finance API")))
                .subcommand(Command::new("set-token").arg(arg!(<token> "Bearer access token")))
                .subcommand(Command::new("clear-token")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(kind_arg())
                        .arg(arg!(--search <TEXT> "Match description, category or merchant"))
                        .arg(
                            arg!(--limit <N> "Show at most N rows")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(arg!(--input <FILE> "Read from a JSON snapshot instead of the API")),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--amount <AMOUNT> "Positive amount").required(true))
                        .arg(kind_arg().default_value("expense"))
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(
                            arg!(--category <ID> "Category id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(arg!(--merchant <TEXT>))
                        .arg(arg!(--notes <TEXT>)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(arg!(<id> "Transaction id").value_parser(value_parser!(i64)))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD"))
                        .arg(arg!(--amount <AMOUNT>))
                        .arg(kind_arg())
                        .arg(arg!(--description <TEXT>))
                        .arg(
                            arg!(--category <ID> "Category id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(arg!(--merchant <TEXT>))
                        .arg(arg!(--notes <TEXT>)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(arg!(<id> "Transaction id").value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(json_flags(Command::new("list").arg(kind_arg())))
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(kind_arg().default_value("expense"))
                        .arg(arg!(--icon <ICON>).default_value("📦"))
                        .arg(arg!(--color <COLOR>).default_value("gray")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(arg!(<id> "Category id").value_parser(value_parser!(i64)))
                        .arg(arg!(--name <NAME>))
                        .arg(kind_arg())
                        .arg(arg!(--icon <ICON>))
                        .arg(arg!(--color <COLOR>)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(arg!(<id> "Category id").value_parser(value_parser!(i64))),
                )
                .subcommand(Command::new("seed").about("Create the default categories")),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(
                            arg!(--category <ID> "Category id")
                                .value_parser(value_parser!(i64))
                                .required(true),
                        )
                        .arg(arg!(--amount <AMOUNT> "Budget ceiling").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(arg!(<id> "Budget id").value_parser(value_parser!(i64)))
                        .arg(
                            arg!(--category <ID> "Category id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(arg!(--amount <AMOUNT> "Budget ceiling")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(arg!(<id> "Budget id").value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(json_flags(snapshot_args(
            Command::new("summary").about("Analytics: monthly trend, categories, insights"),
        )))
        .subcommand(json_flags(snapshot_args(
            Command::new("dashboard").about("This month at a glance"),
        )))
        .subcommand(
            Command::new("profile")
                .about("User profile")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set-budget")
                        .arg(arg!(<amount> "Monthly budget")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(snapshot_args(
                    Command::new("transactions")
                        .arg(
                            arg!(--format <FMT> "csv or json").default_value("csv"),
                        )
                        .arg(arg!(--out <FILE>).required(true)),
                ))
                .subcommand(snapshot_args(
                    Command::new("summary")
                        .arg(
                            arg!(--format <FMT> "csv or json").default_value("csv"),
                        )
                        .arg(arg!(--out <FILE>).required(true)),
                )),
        )
}
