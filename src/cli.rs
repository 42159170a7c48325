// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print pretty JSON instead of a table")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print one JSON object per line")
            .action(ArgAction::SetTrue),
    )
}

fn window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("filter")
            .long("filter")
            .value_name("FILTER")
            .help("Time filter: day|week|month|quarter|year (default month)"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .value_name("YYYY-MM-DD")
            .help("Reference date (default today)"),
    )
    .arg(
        Arg::new("start")
            .long("start")
            .value_name("YYYY-MM-DD")
            .requires("end")
            .help("Custom range start (switches to the custom filter)"),
    )
    .arg(
        Arg::new("end")
            .long("end")
            .value_name("YYYY-MM-DD")
            .requires("start")
            .help("Custom range end"),
    )
}

fn icon_color_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("icon").long("icon").value_name("NAME"))
        .arg(Arg::new("color").long("color").value_name("HEX"))
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .about("Personal finance tracking: accounts, streams, records, budgets, savings")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the data store"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(icon_color_args(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("balance").long("balance").value_name("AMOUNT"))
                        .arg(Arg::new("category").long("category").value_name("NAME"))
                        .arg(
                            Arg::new("savings")
                                .long("savings")
                                .action(ArgAction::SetTrue)
                                .help("Mark as a savings account"),
                        )
                        .arg(Arg::new("bank-name").long("bank-name").value_name("NAME"))
                        .arg(
                            Arg::new("account-number")
                                .long("account-number")
                                .value_name("NUM"),
                        )
                        .arg(
                            Arg::new("routing-number")
                                .long("routing-number")
                                .value_name("NUM"),
                        )
                        .arg(Arg::new("card-type").long("card-type").value_name("TYPE")),
                ))
                .subcommand(output_flags(Command::new("list").about("List accounts")))
                .subcommand(icon_color_args(
                    Command::new("update")
                        .about("Update an account")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("rename").long("rename").value_name("NAME"))
                        .arg(Arg::new("balance").long("balance").value_name("AMOUNT"))
                        .arg(Arg::new("category").long("category").value_name("NAME")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("stream")
                .about("Manage income/expense streams")
                .subcommand(icon_color_args(
                    Command::new("add")
                        .about("Add a stream")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(Arg::new("category").long("category").value_name("NAME")),
                ))
                .subcommand(output_flags(Command::new("list").about("List streams")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a stream")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage display categories")
                .subcommand(icon_color_args(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("scope")
                                .long("scope")
                                .value_name("SCOPE")
                                .help("account|stream (default account)"),
                        ),
                ))
                .subcommand(output_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category (references are left dangling)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Manage transaction records")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction and apply its balance effect")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .required(true)
                                .help("income|expense|transfer|alter"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .value_name("AMOUNT")
                                .required(true),
                        )
                        .arg(Arg::new("from").long("from").value_name("ACCOUNT"))
                        .arg(Arg::new("to").long("to").value_name("ACCOUNT"))
                        .arg(Arg::new("stream").long("stream").value_name("NAME"))
                        .arg(Arg::new("note").long("note").value_name("TEXT"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD")),
                )
                .subcommand(output_flags(window_args(
                    Command::new("list").about("List records in a window").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_name("N")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a record (balances are not readjusted)")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create a budget against a stream or category")
                        .arg(Arg::new("stream").long("stream").value_name("NAME"))
                        .arg(Arg::new("category").long("category").value_name("NAME"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("AMOUNT")
                                .required(true),
                        )
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_name("PERIOD")
                                .help("daily|weekly|monthly|quarterly|yearly (default monthly)"),
                        )
                        .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").value_name("YYYY-MM-DD")),
                )
                .subcommand(output_flags(Command::new("list").about("List budgets")))
                .subcommand(output_flags(window_args(
                    Command::new("status").about("Budget consumption for a window"),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a budget")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("savings")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a savings goal")
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .value_name("NAME")
                                .required(true),
                        )
                        .arg(
                            Arg::new("target")
                                .long("target")
                                .value_name("AMOUNT")
                                .required(true),
                        )
                        .arg(Arg::new("current").long("current").value_name("AMOUNT"))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_name("PERIOD")
                                .help("daily|weekly|monthly|quarterly|yearly (default yearly)"),
                        )
                        .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").value_name("YYYY-MM-DD")),
                )
                .subcommand(output_flags(Command::new("list").about("List savings goals")))
                .subcommand(output_flags(
                    Command::new("status").about("Savings progress"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a savings goal")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over a time window")
                .subcommand(output_flags(window_args(
                    Command::new("summary").about("Income/expense/net totals"),
                )))
                .subcommand(output_flags(window_args(
                    Command::new("streams")
                        .about("Per-stream breakdown")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("income|expense (default expense)"),
                        ),
                )))
                .subcommand(output_flags(window_args(
                    Command::new("series").about("Bucketed income/expense flow"),
                )))
                .subcommand(output_flags(
                    Command::new("distribution").about("Balance share per account"),
                ))
                .subcommand(output_flags(
                    Command::new("groups")
                        .about("Accounts or streams grouped by category")
                        .arg(
                            Arg::new("scope")
                                .long("scope")
                                .value_name("SCOPE")
                                .help("account|stream (default account)"),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("backup")
                        .about("Write a timestamped backup of the raw store")
                        .arg(Arg::new("dir").long("dir").value_name("DIR")),
                )
                .subcommand(
                    Command::new("records")
                        .about("Export the record listing")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_name("FMT")
                                .required(true)
                                .help("csv|json"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .value_name("PATH")
                                .required(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore a backup document")
                .arg(Arg::new("file").required(true)),
        )
        .subcommand(
            Command::new("reset")
                .about("Clear all stored data and fall back to the demo seed")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the destructive reset"),
                ),
        )
        .subcommand(Command::new("doctor").about("Report dangling references"))
}
