//! Three-step upload wizard.
//!
//! ```text
//!   ┌──────────┐  gate 1   ┌──────────┐  gate 2   ┌──────────┐  gate 3
//!   │ 1 Files  │──────────▶│ 2 Details│──────────▶│ 3 Pricing│──────────▶ submit
//!   └──────────┘◀──────────└──────────┘◀──────────└──────────┘
//!                 back (always allowed)
//! ```
//!
//! - gate 1: model and thumbnail staged
//! - gate 2: name, description and category filled in
//! - gate 3: price parses and is strictly positive
//!
//! Files are checked against their slot's allow-list and size ceiling when
//! staged, not again at submission. The draft is never persisted; it is
//! dropped on success or when the wizard goes away.

use std::fmt;

use crate::api::MarketApi;
use crate::config::{MAX_MODEL_SIZE, MAX_THUMBNAIL_SIZE};
use crate::error::{ApiError, ApiResult, GateFailure, StagingError, SubmitBlocked};
use crate::models::{Asset, Category};
use crate::pricing;
use crate::routes::Route;
use crate::wallet::WalletSession;

// =============================================================================
// Steps
// =============================================================================

/// Wizard position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Files,
    Details,
    Pricing,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Files, Step::Details, Step::Pricing];

    /// 1-based number shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            Step::Files => 1,
            Step::Details => 2,
            Step::Pricing => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Files => "Upload Files",
            Step::Details => "Asset Details",
            Step::Pricing => "Set Price",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Files => Some(Step::Details),
            Step::Details => Some(Step::Pricing),
            Step::Pricing => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Files => None,
            Step::Details => Some(Step::Files),
            Step::Pricing => Some(Step::Details),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// =============================================================================
// File staging
// =============================================================================

/// What the wizard knows about a picked file.
#[derive(Clone, Debug, PartialEq)]
pub struct FileMeta {
    pub file_name: String,
    /// MIME type reported by the platform; may be empty.
    pub content_type: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size,
        }
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// A file accepted into a slot, with the platform handle used for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedFile<H> {
    pub meta: FileMeta,
    pub handle: H,
}

/// The two upload slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileSlot {
    Model,
    Thumbnail,
}

impl FileSlot {
    pub fn label(&self) -> &'static str {
        match self {
            FileSlot::Model => "3D model",
            FileSlot::Thumbnail => "thumbnail",
        }
    }

    pub fn max_size(&self) -> u64 {
        match self {
            FileSlot::Model => MAX_MODEL_SIZE,
            FileSlot::Thumbnail => MAX_THUMBNAIL_SIZE,
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileSlot::Model => &["glb", "gltf", "obj"],
            FileSlot::Thumbnail => &["png", "jpg", "jpeg", "webp"],
        }
    }

    fn accepts_mime(&self, mime: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        match self {
            FileSlot::Model => matches!(
                mime.as_str(),
                "model/gltf-binary" | "model/gltf+json" | "model/obj"
            ),
            FileSlot::Thumbnail => mime.starts_with("image/"),
        }
    }

    /// `accept` attribute for the file input.
    pub fn accept_attr(&self) -> String {
        let exts = self.extensions().iter().map(|e| format!(".{}", e));
        match self {
            FileSlot::Model => exts
                .chain(["model/gltf-binary", "model/gltf+json", "model/obj"].map(String::from))
                .collect::<Vec<_>>()
                .join(","),
            FileSlot::Thumbnail => exts
                .chain(std::iter::once("image/*".to_string()))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Check a file against this slot's type allow-list and size ceiling.
    ///
    /// A file is accepted when either its MIME type or its extension is on
    /// the list; browsers often report an empty type for `.glb`.
    pub fn accepts(&self, meta: &FileMeta) -> Result<(), StagingError> {
        let ext_ok = meta
            .extension()
            .is_some_and(|ext| self.extensions().contains(&ext.as_str()));

        if !ext_ok && !self.accepts_mime(&meta.content_type) {
            return Err(StagingError::UnsupportedType {
                slot: self.label(),
                file_name: meta.file_name.clone(),
                accepted: self
                    .extensions()
                    .iter()
                    .map(|e| format!(".{}", e))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        if meta.size == 0 {
            return Err(StagingError::EmptyFile(meta.file_name.clone()));
        }
        if meta.size > self.max_size() {
            return Err(StagingError::TooLarge {
                file_name: meta.file_name.clone(),
                size: meta.size,
                max: self.max_size(),
            });
        }
        Ok(())
    }
}

/// `12.3 MB`-style size for the staging cards.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

// =============================================================================
// Draft
// =============================================================================

/// In-progress upload. Lives only as long as the wizard.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadDraft<H> {
    model: Option<StagedFile<H>>,
    thumbnail: Option<StagedFile<H>>,
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub price: String,
}

impl<H> Default for UploadDraft<H> {
    fn default() -> Self {
        Self {
            model: None,
            thumbnail: None,
            name: String::new(),
            description: String::new(),
            category: None,
            price: String::new(),
        }
    }
}

impl<H> UploadDraft<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file into `slot`, replacing any previous one.
    ///
    /// A rejected file leaves the slot untouched.
    pub fn stage(&mut self, slot: FileSlot, meta: FileMeta, handle: H) -> Result<(), StagingError> {
        slot.accepts(&meta)?;
        log::info!("📦 Staged {} {} ({})", slot.label(), meta.file_name, format_size(meta.size));
        let staged = Some(StagedFile { meta, handle });
        match slot {
            FileSlot::Model => self.model = staged,
            FileSlot::Thumbnail => self.thumbnail = staged,
        }
        Ok(())
    }

    pub fn clear(&mut self, slot: FileSlot) {
        match slot {
            FileSlot::Model => self.model = None,
            FileSlot::Thumbnail => self.thumbnail = None,
        }
    }

    pub fn staged(&self, slot: FileSlot) -> Option<&StagedFile<H>> {
        match slot {
            FileSlot::Model => self.model.as_ref(),
            FileSlot::Thumbnail => self.thumbnail.as_ref(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    /// First reason `step`'s gate is closed, if any.
    pub fn gate(&self, step: Step) -> Result<(), GateFailure> {
        match step {
            Step::Files => {
                if self.model.is_none() {
                    return Err(GateFailure::MissingModel);
                }
                if self.thumbnail.is_none() {
                    return Err(GateFailure::MissingThumbnail);
                }
            }
            Step::Details => {
                if self.name.trim().is_empty() {
                    return Err(GateFailure::MissingName);
                }
                if self.description.trim().is_empty() {
                    return Err(GateFailure::MissingDescription);
                }
                if self.category.is_none() {
                    return Err(GateFailure::MissingCategory);
                }
            }
            Step::Pricing => {
                let price = pricing::parse_price(&self.price).ok_or(GateFailure::InvalidPrice)?;
                if price <= 0.0 {
                    return Err(GateFailure::NonPositivePrice);
                }
            }
        }
        Ok(())
    }

    /// First closed gate across every step.
    pub fn first_blocked(&self) -> Option<(Step, GateFailure)> {
        Step::ALL
            .into_iter()
            .find_map(|step| self.gate(step).err().map(|failure| (step, failure)))
    }

    /// Figures for the pricing step's summary panel.
    pub fn summary(&self) -> DraftSummary {
        let price = pricing::parse_price(&self.price).filter(|p| *p > 0.0);
        DraftSummary {
            name: self.name.trim().to_string(),
            category: self.category.map(|c| c.label()).unwrap_or("-"),
            model_file: self.model.as_ref().map(|f| f.meta.file_name.clone()),
            thumbnail_file: self.thumbnail.as_ref().map(|f| f.meta.file_name.clone()),
            usd_hint: pricing::usd_hint(&self.price),
            platform_fee: price.map(|p| pricing::format_eth(pricing::platform_fee(p))),
            proceeds: price.map(|p| pricing::format_eth(pricing::creator_proceeds(p))),
        }
    }
}

/// Display data for the final review panel.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftSummary {
    pub name: String,
    pub category: &'static str,
    pub model_file: Option<String>,
    pub thumbnail_file: Option<String>,
    pub usd_hint: Option<String>,
    pub platform_fee: Option<String>,
    pub proceeds: Option<String>,
}

// =============================================================================
// Submission payload
// =============================================================================

/// Everything `POST /objects` needs, assembled from a complete draft.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetSubmission<H> {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: Category,
    pub creator_address: String,
    pub model: StagedFile<H>,
    pub thumbnail: StagedFile<H>,
    /// One key per submission attempt, sent as `Idempotency-Key`.
    pub idempotency_key: String,
}

impl<H> AssetSubmission<H> {
    /// Text fields in multipart order.
    pub fn text_fields(&self) -> [(&'static str, &str); 5] {
        use crate::api::form;
        [
            (form::NAME, self.name.as_str()),
            (form::DESCRIPTION, self.description.as_str()),
            (form::PRICE, self.price.as_str()),
            (form::CATEGORY, self.category.as_str()),
            (form::CREATOR_ADDRESS, self.creator_address.as_str()),
        ]
    }
}

// =============================================================================
// Wizard
// =============================================================================

/// Step cursor plus draft plus submission status.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadWizard<H> {
    step: Step,
    pub draft: UploadDraft<H>,
    submitting: bool,
    last_error: Option<String>,
}

impl<H> Default for UploadWizard<H> {
    fn default() -> Self {
        Self {
            step: Step::Files,
            draft: UploadDraft::default(),
            submitting: false,
            last_error: None,
        }
    }
}

impl<H> UploadWizard<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Whether the current step's gate is open.
    pub fn can_advance(&self) -> bool {
        self.draft.gate(self.step).is_ok()
    }

    /// Move forward one step if the current gate passes.
    ///
    /// On the last step this only re-checks the gate; use
    /// [`UploadWizard::begin_submission`] to finish.
    pub fn advance(&mut self) -> Result<Step, GateFailure> {
        self.draft.gate(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move back one step. Always allowed.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Jump to `target` (progress indicator clicks).
    ///
    /// Backward jumps always succeed; forward jumps need every gate on the
    /// way to pass.
    pub fn go_to(&mut self, target: Step) -> Result<Step, SubmitBlocked> {
        if target <= self.step {
            self.step = target;
            return Ok(self.step);
        }
        while self.step < target {
            let step = self.step;
            self.draft
                .gate(step)
                .map_err(|failure| SubmitBlocked::Gate { step, failure })?;
            self.step = step.next().unwrap_or(step);
        }
        Ok(self.step)
    }

    /// Assemble the payload and mark the wizard as submitting.
    ///
    /// `WalletNotConnected` means the caller should open the wallet modal
    /// and let the user retry.
    pub fn begin_submission(&mut self, wallet: &WalletSession) -> Result<AssetSubmission<H>, SubmitBlocked>
    where
        H: Clone,
    {
        if self.submitting {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        if self.step != Step::Pricing {
            return Err(SubmitBlocked::NotOnFinalStep(self.step));
        }
        if let Some((step, failure)) = self.draft.first_blocked() {
            return Err(SubmitBlocked::Gate { step, failure });
        }
        let creator_address = wallet
            .account()
            .ok_or(SubmitBlocked::WalletNotConnected)?
            .to_string();

        let (model, thumbnail, category) = match (
            self.draft.model.clone(),
            self.draft.thumbnail.clone(),
            self.draft.category,
        ) {
            (Some(m), Some(t), Some(c)) => (m, t, c),
            (None, _, _) => {
                return Err(SubmitBlocked::Gate {
                    step: Step::Files,
                    failure: GateFailure::MissingModel,
                })
            }
            (_, None, _) => {
                return Err(SubmitBlocked::Gate {
                    step: Step::Files,
                    failure: GateFailure::MissingThumbnail,
                })
            }
            (_, _, None) => {
                return Err(SubmitBlocked::Gate {
                    step: Step::Details,
                    failure: GateFailure::MissingCategory,
                })
            }
        };

        self.submitting = true;
        self.last_error = None;

        Ok(AssetSubmission {
            name: self.draft.name.trim().to_string(),
            description: self.draft.description.trim().to_string(),
            price: self.draft.price.trim().to_string(),
            category,
            creator_address,
            model,
            thumbnail,
            idempotency_key: uuid::Uuid::new_v4().to_string(),
        })
    }

    /// Upload failed: stay on the pricing step with the draft intact.
    pub fn submission_failed(&mut self, error: &ApiError) {
        log::error!("❌ Upload error: {}", error);
        self.submitting = false;
        self.step = Step::Pricing;
        self.last_error = Some("Failed to upload. Please try again.".to_string());
    }

    /// Upload succeeded: drop the draft and return where to go next.
    pub fn submission_succeeded(&mut self, asset: &Asset) -> Route {
        log::info!("✅ Asset published: {} ({})", asset.name, asset.id);
        *self = Self::default();
        Route::Asset(asset.id.clone())
    }
}

/// Post a prepared submission.
pub async fn submit_upload<A: MarketApi>(
    api: &A,
    submission: &AssetSubmission<A::File>,
) -> ApiResult<Asset> {
    log::info!(
        "📤 Uploading {} ({} + {})",
        submission.name,
        submission.model.meta.file_name,
        submission.thumbnail.meta.file_name
    );
    api.create_asset(submission).await
}

/// Full terminal action: gate, post, then resolve the wizard state.
///
/// Returns the route to navigate to on success.
pub async fn publish<A>(
    api: &A,
    wizard: &mut UploadWizard<A::File>,
    wallet: &WalletSession,
) -> Result<Route, crate::error::MarketError>
where
    A: MarketApi,
    A::File: Clone,
{
    let submission = wizard.begin_submission(wallet)?;
    match submit_upload(api, &submission).await {
        Ok(asset) => Ok(wizard.submission_succeeded(&asset)),
        Err(e) => {
            wizard.submission_failed(&e);
            Err(e.into())
        }
    }
}
