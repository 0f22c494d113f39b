use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickingError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de arquivo não suportado: {0} (use .csv/.xlsx/.xls/.xlsm/.xlsb/.ods)")]
    UnsupportedFormat(String),

    #[error("Erro ao ler a planilha: {0}")]
    SheetRead(String),

    #[error("Erro ao ler CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro ao ler Excel: {0}")]
    Excel(#[from] calamine::Error),

    #[error("Erro ao gerar Excel: {0}")]
    ExcelGeneration(String),

    #[error("Coluna não encontrada: {0}")]
    UnknownColumn(String),

    #[error("Valor numérico inválido: {0}")]
    InvalidValue(String),

    #[error("Mapeamento de colunas cancelado")]
    MappingCancelled,

    #[error("Erro de entrada: {0}")]
    Prompt(String),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] picking_sizer_common::Error),
}

impl From<rust_xlsxwriter::XlsxError> for PickingError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        PickingError::ExcelGeneration(err.to_string())
    }
}

impl From<dialoguer::Error> for PickingError {
    fn from(err: dialoguer::Error) -> Self {
        PickingError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PickingError>;
