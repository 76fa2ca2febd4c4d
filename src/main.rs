use anyhow::Context;
use clap::Parser;
use lady_match::{cli, config, export, input, logging, report};
use lady_match_common::{analyze, normalize, AttributeSpec, MandatoryPolicy, MatchOptions};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("설정 파일을 읽지 못했습니다")?;

    match cli.command {
        Commands::Analyze { input, format, output, input_format, spec, drop_failed, top } => {
            let format = format.unwrap_or(config.default_format);
            // 표준 출력으로 데이터를 흘려보낼 때는 진행 표시를 하지 않는다
            let quiet = output.is_none() && matches!(format, OutputFormat::Csv | OutputFormat::Json);
            let progress = |line: &str| {
                if !quiet {
                    println!("{}", line);
                }
            };

            progress("💞 lady-match - 매칭 분석\n");

            let spec = config.load_spec(spec.as_deref())?;

            progress("[1/3] 입력 읽는 중...");
            let table = input::load_table(&input, input_format)
                .with_context(|| format!("입력을 읽지 못했습니다: {}", input.display()))?;
            progress(&format!("✔ {}명의 응답을 읽었습니다\n", table.len()));

            progress("[2/3] 매칭 계산 중...");
            let policy = if drop_failed { MandatoryPolicy::Drop } else { config.policy };
            let outcome = analyze(&spec, &table, &MatchOptions { policy })?;
            let admissible = outcome.results.iter().filter(|r| r.mandatory_ok).count();
            progress(&format!(
                "✔ {}명 / {}쌍 (필수조건 통과 {}쌍)\n",
                outcome.profiles.len(),
                outcome.results.len(),
                admissible
            ));

            progress("[3/3] 결과 출력 중...");
            match (format, output) {
                (OutputFormat::Table, _) => {
                    print!("{}", report::format_results_table(&outcome.results, top));
                }
                (OutputFormat::Csv, None) => {
                    std::io::stdout().write_all(&export::csv_bytes(&outcome.results)?)?;
                }
                (OutputFormat::Json, None) => {
                    std::io::stdout().write_all(&export::json_bytes(&outcome.results)?)?;
                    println!();
                }
                (format, output) => {
                    if admissible == 0 {
                        println!("{}", report::NO_MATCH_MESSAGE);
                    }
                    let output = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                    for path in export::export_results(&outcome.results, format, &output)? {
                        println!("✔ 저장: {}", path.display());
                    }
                }
            }

            progress("\n✅ 완료");
        }

        Commands::Inspect { input, input_format, spec } => {
            println!("🔍 lady-match - 입력 확인\n");

            let spec = config.load_spec(spec.as_deref())?;
            let table = input::load_table(&input, input_format)
                .with_context(|| format!("입력을 읽지 못했습니다: {}", input.display()))?;
            println!("헤더 {}개 / 행 {}개\n", table.width(), table.len());

            let normalized = normalize(&spec, &table)?;
            print!("{}", report::format_normalization_report(&normalized.report));
            println!();
            print!("{}", report::format_profiles(&spec, &normalized.profiles));
        }

        Commands::Spec { output } => {
            let json = AttributeSpec::builtin().to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ 속성 정의 저장: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { set_spec, clear_spec, set_policy, set_format, show } => {
            let mut config = config;

            if let Some(path) = set_spec {
                config.set_spec_path(Some(path))?;
                println!("✔ 속성 정의 파일을 설정했습니다");
            }

            if clear_spec {
                config.set_spec_path(None)?;
                println!("✔ 내장 속성 정의를 사용합니다");
            }

            if let Some(policy) = set_policy {
                config.policy = policy;
                config.save()?;
                println!("✔ 필수조건 불충족 처리: {}", policy);
            }

            if let Some(format) = set_format {
                config.default_format = format;
                config.save()?;
                println!("✔ 기본 출력 형식: {}", format);
            }

            if show {
                println!("설정:");
                println!("  파일: {}", Config::config_path()?.display());
                println!("  기본 출력 형식: {}", config.default_format);
                println!("  필수조건 불충족 처리: {}", config.policy);
                println!(
                    "  속성 정의: {}",
                    config
                        .spec_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "내장".to_string())
                );
            }
        }
    }

    Ok(())
}
