//! Complexity signal extraction
//!
//! A case-insensitive keyword scan over an item's free-text detail.
//! Descriptions arrive in mixed English and Indonesian, so every keyword
//! family carries synonyms from both languages. Keywords match on word
//! boundaries; each distinct keyword found adds one unit to its count no
//! matter how often it repeats.

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

const FIELD_KEYWORDS: &[&str] = &[
    "field",
    "fields",
    "column",
    "columns",
    "attribute",
    "attributes",
    "dropdown",
    "checkbox",
    "textbox",
    "date picker",
    "kolom",
    "isian",
    "atribut",
    "pilihan",
];

const INTEGRATION_KEYWORDS: &[&str] = &[
    "integration",
    "integrate",
    "api",
    "web service",
    "webservice",
    "webhook",
    "interface",
    "third party",
    "3rd party",
    "sync",
    "synchronize",
    "external system",
    "sap",
    "integrasi",
    "terintegrasi",
    "sinkronisasi",
    "pihak ketiga",
    "sistem eksternal",
];

const WORKFLOW_KEYWORDS: &[&str] = &[
    "workflow",
    "approval",
    "approve",
    "reject",
    "review",
    "escalation",
    "notification",
    "step",
    "stage",
    "alur",
    "persetujuan",
    "menyetujui",
    "tolak",
    "penolakan",
    "tahap",
    "tahapan",
    "notifikasi",
    "eskalasi",
];

const UPLOAD_KEYWORDS: &[&str] = &[
    "upload",
    "attachment",
    "attach",
    "import",
    "unggah",
    "mengunggah",
    "lampiran",
    "impor",
];

const AUTH_KEYWORDS: &[&str] = &[
    "role",
    "roles",
    "permission",
    "permissions",
    "authorization",
    "authentication",
    "login",
    "access right",
    "access rights",
    "hak akses",
    "otorisasi",
    "otentikasi",
    "autentikasi",
    "peran",
];

const CREATE_KEYWORDS: &[&str] = &[
    "create", "add", "insert", "register", "new", "tambah", "menambah", "buat", "membuat",
    "input",
];

const READ_KEYWORDS: &[&str] = &[
    "read", "view", "list", "search", "display", "show", "lihat", "melihat", "cari", "mencari",
    "tampil", "menampilkan", "daftar",
];

const UPDATE_KEYWORDS: &[&str] = &[
    "update", "edit", "modify", "change", "ubah", "mengubah", "perbarui", "memperbarui",
];

const DELETE_KEYWORDS: &[&str] = &["delete", "remove", "hapus", "menghapus"];

/// Compiled keyword family, one whole-word pattern per keyword
struct KeywordSet {
    patterns: RegexSet,
}

impl KeywordSet {
    fn compile(keywords: &[&str]) -> Self {
        let patterns = RegexSet::new(
            keywords
                .iter()
                .map(|kw| format!(r"(?i)\b{}\b", regex::escape(kw))),
        )
        .expect("escaped keyword tables always compile");
        Self { patterns }
    }

    /// Distinct keywords present in `text`
    fn count(&self, text: &str) -> u32 {
        let hits = self.patterns.matches(text).iter().count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }

    fn any(&self, text: &str) -> bool {
        self.patterns.is_match(text)
    }
}

static FIELDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(FIELD_KEYWORDS));
static INTEGRATIONS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(INTEGRATION_KEYWORDS));
static WORKFLOW: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(WORKFLOW_KEYWORDS));
static UPLOAD: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(UPLOAD_KEYWORDS));
static AUTH: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(AUTH_KEYWORDS));
static CREATE: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(CREATE_KEYWORDS));
static READ: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(READ_KEYWORDS));
static UPDATE: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(UPDATE_KEYWORDS));
static DELETE: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::compile(DELETE_KEYWORDS));

/// Qualitative signals found in an item description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// Field-indicator keywords
    pub field_count: u32,
    /// Integration-indicator keywords
    pub integration_count: u32,
    /// Workflow-step keywords
    pub workflow_step_count: u32,
    /// Upload mentioned
    pub has_upload: bool,
    /// Auth or roles mentioned
    pub has_auth_roles: bool,
    /// Create verbs present
    pub has_create: bool,
    /// Read verbs present
    pub has_read: bool,
    /// Update verbs present
    pub has_update: bool,
    /// Delete verbs present
    pub has_delete: bool,
}

impl Signals {
    /// Number of CRUD verb families present
    #[inline]
    #[must_use]
    pub fn crud_families(&self) -> u32 {
        u32::from(self.has_create)
            + u32::from(self.has_read)
            + u32::from(self.has_update)
            + u32::from(self.has_delete)
    }

    /// Check if nothing was detected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Scan free text for complexity signals
///
/// `None` and empty text yield [`Signals::default`].
#[must_use]
pub fn extract_signals(text: Option<&str>) -> Signals {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Signals::default(),
    };

    let signals = Signals {
        field_count: FIELDS.count(text),
        integration_count: INTEGRATIONS.count(text),
        workflow_step_count: WORKFLOW.count(text),
        has_upload: UPLOAD.any(text),
        has_auth_roles: AUTH.any(text),
        has_create: CREATE.any(text),
        has_read: READ.any(text),
        has_update: UPDATE.any(text),
        has_delete: DELETE.any(text),
    };
    tracing::trace!(?signals, "Extracted signals");
    signals
}
