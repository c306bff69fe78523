use clap::Parser;
use price_extract::{cli, config, error, export, extract, inspect, monitor, report, sheet, tagger};
use price_extract_common::{sort_for_report, Summary};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use extract::{Classifier, FilterPolicy};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Extract { input, output, format, strict, rules, top } => {
            println!("💲 price-extract - 価格データ抽出\n");

            // 1. 読み込み
            println!("[1/3] スプレッドシートを読み込み中...");
            let table = sheet::load_table(&input)?;
            println!("✔ {}行 × {}列を読み込み\n", table.row_count(), table.column_count());

            // 2. 抽出
            let rule_path = extract::resolve_rules_path(rules.as_deref(), &config);
            let rulebook = extract::load_rules(rule_path)?;
            let policy = if strict || config.strict {
                FilterPolicy::Strict
            } else {
                FilterPolicy::Lenient
            };
            let classifier = Classifier::new(&rulebook, policy);

            println!("[2/3] 価格データを抽出中...{}", if policy == FilterPolicy::Strict { " (厳格モード)" } else { "" });
            let pb = extract::column_progress(table.column_count());
            let mut records = extract::extract_with_progress(&table, &classifier, Some(&pb));
            pb.finish_and_clear();
            println!("✔ {}件のレコードを抽出\n", records.len());

            // 3. 出力
            println!("[3/3] 結果を保存中...");
            sort_for_report(&mut records);
            let written = export::export_records(&records, &format, &input, output.as_deref())?;
            for path in &written {
                println!("✔ 保存: {}", path.display());
            }

            println!();
            let summary = Summary::from_records(&records);
            report::print_summary(&summary, top.unwrap_or(config.top_models));

            println!("\n✅ 抽出完了");
        }

        Commands::Inspect { input, sample_rows } => {
            println!("🔎 price-extract - ファイル概要: {}\n", input.display());
            inspect::run_inspect(&input, sample_rows)?;
        }

        Commands::Tag { input, output, column, rules } => {
            println!("🏷 price-extract - 型番付与\n");

            let rule_path = extract::resolve_rules_path(rules.as_deref(), &config);
            let rulebook = extract::load_rules(rule_path)?;
            let output = output.unwrap_or_else(|| tagger::default_output_path(&input));

            println!("[1/2] 型番を判定中...");
            let result = tagger::tag_csv(&input, &output, &column, &rulebook)?;
            println!("✔ {}行を処理\n", result.rows);

            println!("[2/2] 型番分布:");
            for (model, count) in result.distribution() {
                println!("  {:<30}: {:3}件", model, count);
            }

            println!("\n✅ 保存: {}", output.display());
        }

        Commands::Watch { path, interval, log, once } => {
            let mut settings = config.monitor.clone();
            if let Some(path) = path {
                settings.watch_path = path;
            }
            if let Some(seconds) = interval {
                settings.interval_seconds = seconds;
            }
            if let Some(log) = log {
                settings.log_path = log;
            }

            println!("👀 price-extract - フォルダ監視\n");
            println!("  監視フォルダ: {}", settings.watch_path.display());
            println!("  記録先: {}", settings.log_path.display());

            let mut folder_monitor = monitor::FolderMonitor::new(settings);
            println!("  既存エントリ: {}件\n", folder_monitor.known_count());

            if once {
                println!("{}秒間の変化を確認中...", folder_monitor.config().once_window_seconds);
                let count = folder_monitor.run_once()?;
                println!("\n✅ 新規{}件", count);
            } else {
                println!("{}秒ごとに確認中（Ctrl+Cで終了）...", folder_monitor.config().interval_seconds);
                folder_monitor.run()?;
            }
        }

        Commands::Config { set_rules, set_watch_path, set_interval, show } => {
            let mut config = config;

            if let Some(path) = set_rules {
                config.set_rules_path(path)?;
                println!("✔ ルールテーブルを設定しました");
            }

            if let Some(path) = set_watch_path {
                config.set_watch_path(path)?;
                println!("✔ 監視フォルダを設定しました");
            }

            if let Some(seconds) = set_interval {
                config.set_interval(seconds)?;
                println!("✔ 監視間隔を設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  ルールテーブル: {}",
                    config
                        .rules_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".to_string())
                );
                println!("  厳格モード: {}", if config.strict { "有効" } else { "無効" });
                println!("  型番表示件数: {}", config.top_models);
                println!("  監視フォルダ: {}", config.monitor.watch_path.display());
                println!("  監視間隔: {}秒", config.monitor.interval_seconds);
                println!("  記録先: {}", config.monitor.log_path.display());
            }
        }
    }

    Ok(())
}
