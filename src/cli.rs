use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picking-sizer")]
#[command(about = "Dimensionamento de picking a partir da saída cúbica diária", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Exibe logs detalhados
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mostra as colunas detectadas automaticamente
    Detect {
        /// Arquivo de entrada (CSV/Excel)
        #[arg(required = true)]
        file: PathBuf,

        /// Planilha a ler (padrão: configuração, "Base")
        #[arg(long)]
        sheet: Option<String>,

        /// Detecta também colunas informativas (descrição, fornecedor etc.)
        #[arg(long)]
        all_roles: bool,
    },

    /// Classifica todos os itens e grava o resultado
    Classify {
        /// Arquivo de entrada (CSV/Excel)
        #[arg(required = true)]
        file: PathBuf,

        /// Planilha a ler
        #[arg(long)]
        sheet: Option<String>,

        /// Coluna do código do produto
        #[arg(long)]
        product_code: Option<String>,

        /// Coluna do departamento
        #[arg(long)]
        department: Option<String>,

        /// Coluna da saída cúbica diária (m³/dia)
        #[arg(long)]
        daily_output: Option<String>,

        /// Confirma o mapeamento interativamente
        #[arg(short, long)]
        interactive: bool,

        /// Formato de saída (json/excel/both)
        #[arg(short, long, default_value = "both")]
        format: OutputFormat,

        /// Arquivo ou diretório de saída (padrão: pasta do arquivo de entrada)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Detecta e exporta também colunas informativas
        #[arg(long)]
        all_roles: bool,
    },

    /// Classifica um único valor de saída cúbica
    Value {
        /// Saída cúbica (m³/dia); aceita vírgula decimal
        #[arg(required = true, allow_hyphen_values = true)]
        daily_output: String,
    },

    /// Mostra ou edita os parâmetros dos formatos
    Params {
        /// Mostra os parâmetros
        #[arg(long)]
        show: bool,

        /// Define um parâmetro ("CHAVE=VALOR", pode repetir)
        #[arg(long = "set", value_name = "CHAVE=VALOR")]
        set: Vec<String>,

        /// Restaura os valores padrão
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    Json,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            "both" => Ok(OutputFormat::Both),
            _ => Err(format!("Formato desconhecido: {}. Use json, excel ou both", s)),
        }
    }
}
