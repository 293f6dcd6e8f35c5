//! Upload wizard: files, details, price.
//!
//! All wizard state lives in one `UploadWizard<File>` signal; the view only
//! renders it and forwards input. Forward moves go through the step gates,
//! so a disabled button and a rejected click always agree.

use dimension_core::wizard::format_size;
use dimension_core::{
    submit_upload, CancelToken, Category, FileMeta, FileSlot, Step, SubmitBlocked,
    UploadWizard, WalletSession,
};
use leptos::*;
use leptos_meta::Title;
use leptos_router::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::services::HttpMarketApi;

type Wizard = RwSignal<UploadWizard<File>>;

/// Text of the primary wizard button.
fn primary_label(step: Step, submitting: bool) -> &'static str {
    match (step, submitting) {
        (_, true) => "Uploading...",
        (Step::Pricing, false) => "Create Asset",
        _ => "Continue",
    }
}

#[component]
fn ProgressSteps(wizard: Wizard, notice: RwSignal<Option<String>>) -> impl IntoView {
    let current = move || wizard.with(|w| w.step());

    view! {
        <div class="wizard-steps">
            {Step::ALL
                .into_iter()
                .map(|step| view! {
                    <button
                        class="wizard-step"
                        class:active={move || current() >= step}
                        class:done={move || current() > step}
                        on:click=move |_| {
                            match wizard.try_update(|w| w.go_to(step)) {
                                Some(Err(blocked)) => notice.set(Some(blocked.to_string())),
                                _ => notice.set(None),
                            }
                        }
                    >
                        <span class="wizard-step-number">
                            {move || if current() > step { "✓".to_string() } else { step.to_string() }}
                        </span>
                        <span class="wizard-step-title">{step.title()}</span>
                    </button>
                })
                .collect_view()}
        </div>
    }
}

/// One file slot: picker, staged file card, and the staging error.
#[component]
fn FileDrop(kind: FileSlot, wizard: Wizard) -> impl IntoView {
    let error = create_rw_signal(None::<String>);
    let input_id = format!("file-{}", kind.label().replace(' ', "-"));
    let zone_for = input_id.clone();

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let meta = FileMeta::new(file.name(), file.type_(), file.size() as u64);

        match wizard.try_update(|w| w.draft.stage(kind, meta, file)) {
            Some(Err(e)) => {
                log::warn!("⚠️ {}", e);
                error.set(Some(e.to_string()));
            }
            _ => error.set(None),
        }
        // Allow picking the same file again after clearing it.
        input.set_value("");
    };

    let staged = move || {
        wizard.with(|w| {
            w.draft
                .staged(kind)
                .map(|f| (f.meta.file_name.clone(), format_size(f.meta.size)))
        })
    };

    let (title, hint) = match kind {
        FileSlot::Model => ("3D Model File", "GLB, GLTF or OBJ up to 50 MB"),
        FileSlot::Thumbnail => ("Thumbnail Image", "PNG, JPG or WEBP up to 5 MB"),
    };

    view! {
        <div class="file-drop">
            <label class="field-label">{title}</label>
            {move || match staged() {
                Some((name, size)) => view! {
                    <div class="file-card">
                        <span class="file-name">{name}</span>
                        <span class="file-size">{size}</span>
                        <button class="file-remove" on:click=move |_| wizard.update(|w| w.draft.clear(kind))>
                            "Remove"
                        </button>
                    </div>
                }
                .into_view(),
                None => view! {
                    <label class="upload-zone" for=zone_for.clone()>
                        <div class="upload-icon">"📤"</div>
                        <div class="upload-text">"Click to select a file"</div>
                        <div class="upload-hint">{hint}</div>
                    </label>
                }
                .into_view(),
            }}
            <input
                type="file"
                id=input_id
                accept=kind.accept_attr()
                style="display:none"
                on:change=on_file_change
            />
            {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}
        </div>
    }
}

#[component]
fn DetailsStep(wizard: Wizard) -> impl IntoView {
    view! {
        <div class="wizard-panel">
            <h2>"Asset Details"</h2>

            <label class="field-label">"Name"</label>
            <input
                type="text"
                class="text-input"
                placeholder="e.g., Cyber Warrior"
                prop:value=move || wizard.with(|w| w.draft.name.clone())
                on:input=move |ev| wizard.update(|w| w.draft.set_name(event_target_value(&ev)))
            />

            <label class="field-label">"Description"</label>
            <textarea
                class="text-input"
                rows="4"
                placeholder="Describe your 3D asset..."
                prop:value=move || wizard.with(|w| w.draft.description.clone())
                on:input=move |ev| wizard.update(|w| w.draft.set_description(event_target_value(&ev)))
            ></textarea>

            <label class="field-label">"Category"</label>
            <div class="category-grid">
                {Category::ALL
                    .into_iter()
                    .map(|category| view! {
                        <button
                            class="category-tile"
                            class:active={move || wizard.with(|w| w.draft.category == Some(category))}
                            on:click=move |_| wizard.update(|w| w.draft.set_category(category))
                        >
                            <span class="category-icon">{category.icon()}</span>
                            <span>{category.label()}</span>
                        </button>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn PricingStep(wizard: Wizard) -> impl IntoView {
    let price = move || wizard.with(|w| w.draft.price.clone());
    let summary = move || wizard.with(|w| w.draft.summary());

    view! {
        <div class="wizard-panel">
            <h2>"Set Your Price"</h2>

            <label class="field-label">"Price in ETH"</label>
            <input
                type="number"
                class="text-input price-input"
                step="0.001"
                min="0"
                placeholder="0.00"
                prop:value=price
                on:input=move |ev| wizard.update(|w| w.draft.set_price(event_target_value(&ev)))
            />
            {move || summary().usd_hint.map(|hint| view! { <p class="price-usd">{hint}</p> })}

            <div class="fee-notice">
                <strong>"Platform Fee:"</strong>
                " 2.5% of each sale goes to Dimension Market."
            </div>

            <div class="summary">
                <h3>"Summary"</h3>
                {move || {
                    let s = summary();
                    let price = price();
                    view! {
                        <div class="summary-row"><span>"Asset Name"</span><span>{s.name}</span></div>
                        <div class="summary-row"><span>"Category"</span><span>{s.category}</span></div>
                        <div class="summary-row"><span>"Model File"</span><span>{s.model_file.unwrap_or_default()}</span></div>
                        <div class="summary-row"><span>"Thumbnail"</span><span>{s.thumbnail_file.unwrap_or_default()}</span></div>
                        {s.platform_fee.map(|fee| view! {
                            <div class="summary-row"><span>"Platform fee"</span><span>{fee}</span></div>
                        })}
                        {s.proceeds.map(|proceeds| view! {
                            <div class="summary-row"><span>"You receive"</span><span>{proceeds}</span></div>
                        })}
                        <div class="summary-row total">
                            <span>"Price"</span>
                            <span>{format!("{} ETH", price.trim())}</span>
                        </div>
                    }
                }}
            </div>
        </div>
    }
}

#[component]
pub fn UploadPage(
    api: HttpMarketApi,
    wallet: RwSignal<WalletSession>,
    wallet_modal: RwSignal<bool>,
) -> impl IntoView {
    let wizard: Wizard = create_rw_signal(UploadWizard::new());
    let notice = create_rw_signal(None::<String>);
    let navigate = use_navigate();

    let alive = CancelToken::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    let submit = Callback::new(move |_: ()| {
        let session = wallet.get_untracked();
        match wizard.try_update(|w| w.begin_submission(&session)) {
            Some(Ok(submission)) => {
                notice.set(None);
                let api = api.clone();
                let alive = alive.clone();
                let navigate = navigate.clone();
                spawn_local(async move {
                    let result = submit_upload(&api, &submission).await;
                    alive.commit(|| match result {
                        Ok(asset) => {
                            if let Some(route) = wizard.try_update(|w| w.submission_succeeded(&asset)) {
                                navigate(&route.path(), Default::default());
                            }
                        }
                        Err(e) => wizard.update(|w| w.submission_failed(&e)),
                    });
                });
            }
            Some(Err(SubmitBlocked::WalletNotConnected)) => {
                log::warn!("⚠️ Wallet not connected, opening wallet modal");
                wallet_modal.set(true);
            }
            Some(Err(blocked)) => notice.set(Some(blocked.to_string())),
            None => {}
        }
    });

    let on_primary = move |_| {
        if wizard.with_untracked(|w| w.step()) == Step::Pricing {
            submit.call(());
            return;
        }
        match wizard.try_update(|w| w.advance()) {
            Some(Err(failure)) => notice.set(Some(failure.to_string())),
            _ => notice.set(None),
        }
    };

    let on_back = move |_| {
        notice.set(None);
        wizard.update(|w| {
            w.back();
        });
    };

    let step = move || wizard.with(|w| w.step());
    let submitting = move || wizard.with(|w| w.is_submitting());

    view! {
        <Title text="Create | Dimension Market"/>
        <div class="upload-page">
            <div class="page-header">
                <h1>"Create " <span class="gradient-text">"New Asset"</span></h1>
                <p class="subtitle">"Upload your 3D model and start earning crypto"</p>
            </div>

            <Show when=move || !wallet.with(|s| s.is_connected()) fallback=|| view! {}>
                <div class="sign-in-banner">
                    <span>"Sign in with your wallet to start uploading and selling your 3D assets."</span>
                    <button class="secondary-button" on:click=move |_| wallet_modal.set(true)>
                        "Sign in"
                    </button>
                </div>
            </Show>

            <ProgressSteps wizard=wizard notice=notice/>

            {move || match step() {
                Step::Files => view! {
                    <div class="wizard-panel">
                        <h2>"Upload Files"</h2>
                        <FileDrop kind=FileSlot::Model wizard=wizard/>
                        <FileDrop kind=FileSlot::Thumbnail wizard=wizard/>
                    </div>
                }
                .into_view(),
                Step::Details => view! { <DetailsStep wizard=wizard/> }.into_view(),
                Step::Pricing => view! { <PricingStep wizard=wizard/> }.into_view(),
            }}

            {move || notice.get().map(|msg| view! { <div class="notice">{msg}</div> })}

            {move || wizard.with(|w| w.last_error().map(str::to_string)).map(|msg| view! {
                <div class="error-message">
                    {msg}
                    <button class="error-dismiss" on:click=move |_| wizard.update(|w| w.dismiss_error())>
                        "Dismiss"
                    </button>
                </div>
            })}

            <div class="wizard-nav">
                <Show when=move || step() != Step::Files fallback=|| view! {}>
                    <button class="secondary-button" disabled=submitting on:click=on_back>
                        "Back"
                    </button>
                </Show>
                <button
                    class="primary-button"
                    disabled=move || submitting() || !wizard.with(|w| w.can_advance())
                    on:click=on_primary
                >
                    {move || primary_label(step(), submitting())}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        assert_eq!(primary_label(Step::Files, false), "Continue");
        assert_eq!(primary_label(Step::Details, false), "Continue");
        assert_eq!(primary_label(Step::Pricing, false), "Create Asset");
        assert_eq!(primary_label(Step::Pricing, true), "Uploading...");
    }
}
