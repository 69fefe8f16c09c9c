use thiserror::Error;

/// Path of an element inside the parsed tree, used to annotate diagnostics.
///
/// Segments are dot-joined on `Display`, matching the syntax accepted by
/// `derivedFrom`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ElementPath(pub Vec<String>);

impl ElementPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }
}

impl std::fmt::Display for ElementPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Fatal errors raised while resolving a parsed device into a processed one.
///
/// Every variant keeps the [`ElementPath`] of the node that triggered it so
/// a caller can point a user at the offending element.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{path}: inheritance cycle detected")]
    ResolveCycle { path: ElementPath },

    #[error("{path}: could not resolve derivedFrom path `{derive_path}`")]
    UnresolvedDerivation {
        path: ElementPath,
        derive_path: String,
    },

    #[error("{path}: derivedFrom path `{derive_path}` is ambiguous")]
    AmbiguousDerivation {
        path: ElementPath,
        derive_path: String,
    },

    #[error("{path}: invalid dim configuration: {reason}")]
    DimMisconfiguration { path: ElementPath, reason: String },

    #[error("{path}: field `{a}` overlaps field `{b}`")]
    FieldOverlap {
        path: ElementPath,
        a: String,
        b: String,
    },

    #[error("{path}: register/cluster `{a}` overlaps `{b}` with no alternate relationship")]
    RegisterOverlap {
        path: ElementPath,
        a: String,
        b: String,
    },

    #[error("{path}: enumeratedValues usage conflict")]
    EnumUsageConflict { path: ElementPath },

    #[error("{path}: duplicate enumerated value `{value}`")]
    DuplicateEnumValue { path: ElementPath, value: u64 },

    #[error("{path}: duplicate enumerated value name `{name}`")]
    DuplicateEnumName { path: ElementPath, name: String },

    #[error("{path}: derivedFrom target `{derive_path}` is at a different element level")]
    DerivationLevelMismatch {
        path: ElementPath,
        derive_path: String,
    },

    #[error("{path}: an element cannot derive from itself")]
    SelfDerivation { path: ElementPath },

    #[error("{path}: derivedFrom cannot target the Device")]
    BaseIsDevice { path: ElementPath },
}

impl ResolveError {
    pub fn path(&self) -> &ElementPath {
        match self {
            Self::ResolveCycle { path }
            | Self::UnresolvedDerivation { path, .. }
            | Self::AmbiguousDerivation { path, .. }
            | Self::DimMisconfiguration { path, .. }
            | Self::FieldOverlap { path, .. }
            | Self::RegisterOverlap { path, .. }
            | Self::EnumUsageConflict { path }
            | Self::DuplicateEnumValue { path, .. }
            | Self::DuplicateEnumName { path, .. }
            | Self::DerivationLevelMismatch { path, .. }
            | Self::SelfDerivation { path }
            | Self::BaseIsDevice { path } => path,
        }
    }
}

/// Non-fatal findings accumulated during a `resolve` call.
///
/// Warnings never abort resolution; they are appended to the caller-supplied
/// sink and can be inspected afterwards.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind")]
pub enum Warning {
    RegisterOverlapViaAlternate {
        path: ElementPath,
        a: String,
        b: String,
    },
    PeripheralOverlapViaAlternate {
        path: ElementPath,
        a: String,
        b: String,
    },
    PeripheralOverlap {
        path: ElementPath,
        a: String,
        b: String,
    },
    LegacyAccessToken {
        path: ElementPath,
        token: String,
    },
    FieldOutOfRegisterRange {
        path: ElementPath,
        field: String,
    },
    EnumContainerCrossScopeDerivation {
        path: ElementPath,
        derive_path: String,
    },
}

/// Errors raised while parsing CMSIS-SVD XML into the parsed tree.
///
/// This is deliberately a thin wrapper: schema validation is out of scope
/// (see module docs), the ingestion layer only needs to surface malformed
/// XML and a handful of closed-vocabulary tokens it cannot map.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid XML syntax: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("unknown token `{token}` for `{field}`")]
    UnknownToken { field: &'static str, token: String },

    #[error("invalid integer literal `{0}`")]
    InvalidInteger(String),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
pub type ParseResult<T> = Result<T, ParseError>;
