// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("hisab")
        .version(crate_version!())
        .about("Multi-currency personal finance tracker: transactions, savings goals, profiles")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Manage profiles (independent sub-ledgers)")
                .subcommand(
                    Command::new("add")
                        .about("Create a profile and switch to it")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List profiles")))
                .subcommand(
                    Command::new("switch")
                        .about("Switch the active profile")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .about("Rename a profile")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a profile and all of its data")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction in the active profile's currency")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense|savings"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(
                            Arg::new("exclude-from-balance")
                                .long("exclude-from-balance")
                                .action(ArgAction::SetTrue)
                                .help("Savings only: count in savings totals without deducting from balance"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; omitted fields keep their value")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("exclude-from-balance")
                                .long("exclude-from-balance")
                                .help("true|false"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List transactions"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals and the general savings pool")
                .subcommand(
                    Command::new("add")
                        .about("Create a savings goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("fixed-deposit")
                                .long("fixed-deposit")
                                .action(ArgAction::SetTrue)
                                .help("Lock the goal: withdrawals refused until unlocked via edit"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List goals and the general pool")))
                .subcommand(
                    Command::new("edit")
                        .about("Rename/retarget a goal; omitted fields keep their value")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("rename").long("rename"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("fixed-deposit")
                                .long("fixed-deposit")
                                .help("true|false"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal (its transaction history stays)")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("deposit")
                        .about("Deposit into a goal, or the general pool when --goal is omitted")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("goal").long("goal"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("withdraw")
                        .about("Withdraw from a goal, or the general pool when --goal is omitted")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("goal").long("goal"))
                        .arg(Arg::new("date").long("date")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Per-type category lists")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(Arg::new("type").long("type")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency and conversions")
                .subcommand(Command::new("list").about("List supported currencies"))
                .subcommand(
                    Command::new("set")
                        .about("Set the display currency; goals are re-denominated in place")
                        .arg(Arg::new("code").long("code").required(true)),
                )
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between currencies")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
        .subcommand(
            json_flags(Command::new("stats").about("Dashboard totals for the active profile"))
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .help("Display currency override"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views over the transaction list")
                .subcommand(
                    json_flags(Command::new("cashflow").about("Income vs expense per month")).arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(clap::value_parser!(usize)),
                    ),
                )
                .subcommand(
                    json_flags(
                        Command::new("spend-by-category").about("Expense totals by category"),
                    )
                    .arg(Arg::new("month").long("month").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export the active profile")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json (full snapshot) or csv (transactions only)"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore a JSON snapshot into the active profile (replaces its data)")
                .arg(Arg::new("file").long("file").required(true)),
        )
        .subcommand(Command::new("doctor").about("Check stored data for consistency issues"))
}
