use std::fmt::{self, Display, Formatter};

/// Stable REST error taxonomy returned by the serving core. Raw backing-store
/// text never reaches the client unless explicitly embedded in `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestErrorKind {
    IncorrectPrimaryKey,
    FeatureNotExist,
    IncorrectFeatureValue,
    WrongDataType,
    FeatureStoreNotShared,
    FeatureViewNotExist,
    ReadFromDbFailBadInput,
    ReadFromDbFail,
}

impl RestErrorKind {
    pub fn status(&self) -> u16 {
        match self {
            Self::IncorrectPrimaryKey => 400,
            Self::FeatureNotExist => 404,
            Self::IncorrectFeatureValue => 400,
            Self::WrongDataType => 400,
            Self::FeatureStoreNotShared => 401,
            Self::FeatureViewNotExist => 404,
            Self::ReadFromDbFailBadInput => 400,
            Self::ReadFromDbFail => 500,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::IncorrectPrimaryKey => "Incorrect primary key.",
            Self::FeatureNotExist => "Feature does not exist.",
            Self::IncorrectFeatureValue => "Incorrect feature value.",
            Self::WrongDataType => "Wrong data type.",
            Self::FeatureStoreNotShared => "Accessing unshared feature store is not allowed.",
            Self::FeatureViewNotExist => "Feature view does not exist.",
            Self::ReadFromDbFailBadInput => "Reading feature store failed; bad input.",
            Self::ReadFromDbFail => "Reading feature store failed.",
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> RestError {
        RestError {
            kind: self,
            message: message.into(),
        }
    }
}

impl From<RestErrorKind> for RestError {
    fn from(kind: RestErrorKind) -> Self {
        RestError {
            kind,
            message: kind.default_message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestError {
    kind: RestErrorKind,
    message: String,
}

impl RestError {
    pub fn kind(&self) -> RestErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.kind.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for RestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RestError {}
