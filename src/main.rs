use clap::Parser;
use picking_sizer::{cli, config, error, export, logging, mapping_prompt, reader};
use cli::{Cli, Commands};
use config::Config;
use error::{PickingError, Result};
use picking_sizer_common::{
    match_columns, process_batch, summarize, FormatParameters, PickingSummary, Role, ThresholdTable,
};
use picking_sizer_common::matcher::rank_headers;
use std::path::{Path, PathBuf};

const CANDIDATES_SHOWN: usize = 3;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Detect { file, sheet, all_roles } => {
            println!("🔎 picking-sizer - detecção de colunas\n");

            let sheet_name = sheet.unwrap_or_else(|| config.sheet_name.clone());
            let table = reader::read_sheet(&file, &sheet_name)?;
            println!("✔ {} colunas / {} linhas lidas", table.headers.len(), table.rows.len());

            let keywords = config.role_keywords(all_roles);
            let mapping = match_columns(&table.headers, &keywords);
            let roles: Vec<Role> = keywords.roles().collect();

            println!("\n🗂  Colunas detectadas (* = obrigatória):");
            mapping_prompt::print_mapping(&mapping, &roles);

            println!("\nCandidatas (até {} por campo, com pontuação):", CANDIDATES_SHOWN);
            for (role, role_keywords) in keywords.iter() {
                let candidates: Vec<String> = rank_headers(&table.headers, role_keywords)
                    .into_iter()
                    .take(CANDIDATES_SHOWN)
                    .map(|c| format!("{} ({})", c.column, c.score))
                    .collect();
                let listed = if candidates.is_empty() {
                    "-".to_string()
                } else {
                    candidates.join(", ")
                };
                println!("  {}: {}", role.label(), listed);
            }

            let missing = mapping.missing_required();
            if missing.is_empty() {
                println!("\n✅ Todas as colunas obrigatórias foram detectadas");
            } else {
                let names: Vec<&str> = missing.iter().map(|r| r.label()).collect();
                println!("\n⚠ Colunas obrigatórias não detectadas: {}", names.join(", "));
            }
        }

        Commands::Classify {
            file,
            sheet,
            product_code,
            department,
            daily_output,
            interactive,
            format,
            output,
            all_roles,
        } => {
            println!("📦 picking-sizer - dimensionamento de picking\n");

            // 1. 読み込み
            println!("[1/4] Lendo arquivo...");
            let sheet_name = sheet.unwrap_or_else(|| config.sheet_name.clone());
            let table = reader::read_sheet(&file, &sheet_name)?;
            println!("✔ {} colunas / {} linhas lidas\n", table.headers.len(), table.rows.len());

            // 2. 列マッピング
            println!("[2/4] Detectando colunas...");
            let keywords = config.role_keywords(all_roles);
            let roles: Vec<Role> = keywords.roles().collect();
            let mapping = match_columns(&table.headers, &keywords);
            let mapping = mapping_prompt::apply_column_overrides(
                mapping,
                &table.headers,
                &[
                    (Role::ProductCode, product_code),
                    (Role::Department, department),
                    (Role::DailyCubicOutput, daily_output),
                ],
            )?;
            let mapping = if interactive {
                mapping_prompt::confirm_mapping_interactive(&table.headers, mapping, &roles)?
            } else {
                mapping_prompt::print_mapping(&mapping, &roles);
                mapping
            };
            println!("✔ Mapeamento de colunas confirmado\n");

            // 3. 判定
            println!("[3/4] Classificando itens...");
            let items = process_batch(&table.rows, &mapping, &config.parameters)?;
            let summary = summarize(&items);
            println!("✔ {} itens classificados\n", items.len());
            print_summary(&summary);

            // 4. 出力
            println!("\n[4/4] Gravando resultados...");
            let source = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let title = format!(
                "{}_picking",
                file.file_stem().and_then(|s| s.to_str()).unwrap_or("resultado")
            );
            let output = output.unwrap_or_else(|| default_output_dir(&file));
            let ctx = export::ExportContext {
                source: &source,
                headers: &table.headers,
                mapping: &mapping,
                parameters: &config.parameters,
                items: &items,
                summary: &summary,
            };
            for path in export::export_results(&ctx, &format, &output, &title)? {
                println!("✔ Salvo: {}", path.display());
            }

            println!("\n✅ Classificação concluída");
        }

        Commands::Value { daily_output } => {
            let value = daily_output
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| PickingError::InvalidValue(daily_output.clone()))?;

            let table = ThresholdTable::compile(&config.parameters);
            let format = table.classify(value);
            println!("{} m³/dia → {}\n", value, format);
            print_thresholds(&config.parameters);
        }

        Commands::Params { show, set, reset } => {
            let mut config = config;
            let mut changed = false;

            if reset {
                config.reset_parameters();
                changed = true;
                println!("✔ Parâmetros restaurados para os valores padrão");
            }

            for assignment in &set {
                config.set_parameter(assignment)?;
                changed = true;
                println!("✔ Definido: {}", assignment);
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("Parâmetros:");
                for (key, value) in config.parameters.to_labeled() {
                    println!("  {}: {}", key, value);
                }
                print_thresholds(&config.parameters);
            }
        }
    }

    Ok(())
}

fn default_output_dir(file: &Path) -> PathBuf {
    file.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_summary(summary: &PickingSummary) {
    println!("Por tipo de picking:");
    for count in &summary.by_format {
        println!(
            "  {:<16} {:>6}  ({:>6.2}%)",
            count.format.label(),
            count.count,
            count.percentage
        );
    }
}

fn print_thresholds(params: &FormatParameters) {
    println!("Consumo máximo (m³/dia; acima dele o formato é escolhido):");
    for (format, threshold) in ThresholdTable::compile(params).thresholds() {
        println!("  {:<16} {:.6}", format.label(), threshold);
    }
}
