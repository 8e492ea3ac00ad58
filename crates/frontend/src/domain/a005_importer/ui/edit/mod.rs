pub mod form;

use contracts::domain::a005_importer::dto::ImporterType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use self::form::{
    error_of, ConfigField, FieldError, FormStep, ImporterForm, PERIOD_UNITS, SIZE_LIMIT_UNITS,
};
use crate::domain::a005_importer::model::{
    create_importer, fetch_importer, fetch_importers, update_importer,
};
use crate::shared::components::not_found::NotFound;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::query::use_query;
use crate::shared::route_params::{use_required_param, PathParam};

#[component]
pub fn ImporterCreate() -> impl IntoView {
    let importers = use_query(|| (), |_| fetch_importers());
    let existing_names = Signal::derive(move || {
        importers
            .data
            .with(|d| d.iter().flatten().map(|i| i.name.clone()).collect::<Vec<_>>())
    });

    view! {
        <PageFrame page_id="a005_importer--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/importers" attr:class="page__back">"Importers"</A>
                    <h1 class="page__title">"Create Importer"</h1>
                </div>
            </div>
            <div class="page__content">
                <ImporterFormView initial=ImporterForm::default() is_edit=false existing_names=existing_names />
            </div>
        </PageFrame>
    }
}

#[component]
pub fn ImporterEdit() -> impl IntoView {
    let importer_name = use_required_param(PathParam::ImporterName);

    move || match importer_name.get() {
        Ok(name) => view! { <ImporterEditView name=name /> }.into_any(),
        Err(e) => {
            log::warn!("{}", e);
            view! { <NotFound /> }.into_any()
        }
    }
}

#[component]
fn ImporterEditView(name: String) -> impl IntoView {
    let stored_name = StoredValue::new(name);
    let query = use_query(move || stored_name.get_value(), fetch_importer);

    view! {
        <PageFrame page_id="a005_importer--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/importers" attr:class="page__back">"Importers"</A>
                    <h1 class="page__title">{move || format!("Edit {}", stored_name.get_value())}</h1>
                </div>
            </div>
            <div class="page__content">
                {move || query.error.get().map(|err| view! {
                    <div class="alert alert--error">{format!("Unable to load the importer: {}", err)}</div>
                })}
                {move || query.data.get().map(|importer| view! {
                    <ImporterFormView
                        initial=ImporterForm::from_importer(&importer)
                        is_edit=true
                        existing_names=Signal::derive(Vec::new)
                    />
                })}
            </div>
        </PageFrame>
    }
}

#[component]
fn FieldRow(
    label: &'static str,
    field: &'static str,
    errors: RwSignal<Vec<FieldError>>,
    #[prop(optional)] help: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form__field">
            <label class="form__label">{label}</label>
            {children()}
            {(!help.is_empty()).then(|| view! { <span class="form__help">{help}</span> })}
            {move || errors.with(|e| error_of(e, field)).map(|msg| view! {
                <span class="form__error" role="alert">{msg}</span>
            })}
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    field: &'static str,
    form: RwSignal<ImporterForm>,
    errors: RwSignal<Vec<FieldError>>,
    get: fn(&ImporterForm) -> String,
    set: fn(&mut ImporterForm, String),
    #[prop(optional)] multiline: bool,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] secret: bool,
    #[prop(optional)] help: &'static str,
) -> impl IntoView {
    let value = move || form.with(get);
    let input_type = if secret { "password" } else { "text" };
    let input = if multiline {
        view! {
            <textarea
                class="form__input"
                rows="3"
                disabled=disabled
                prop:value=value
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    form.update(|f| set(f, text));
                }
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                class="form__input"
                type=input_type
                disabled=disabled
                prop:value=value
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    form.update(|f| set(f, text));
                }
            />
        }
        .into_any()
    };

    view! {
        <FieldRow label=label field=field errors=errors help=help>
            {input}
        </FieldRow>
    }
}

#[component]
fn CheckField(
    label: &'static str,
    form: RwSignal<ImporterForm>,
    get: fn(&ImporterForm) -> bool,
    set: fn(&mut ImporterForm, bool),
) -> impl IntoView {
    view! {
        <label class="form__check">
            <input
                type="checkbox"
                prop:checked=move || form.with(get)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    form.update(|f| set(f, checked));
                }
            />
            " "
            {label}
        </label>
    }
}

fn unit_select(
    form: RwSignal<ImporterForm>,
    units: &'static [&'static str],
    get: fn(&ImporterForm) -> String,
    set: fn(&mut ImporterForm, String),
) -> impl IntoView {
    view! {
        <select
            class="form__select"
            on:change=move |ev| {
                let unit = event_target_value(&ev);
                form.update(|f| set(f, unit));
            }
        >
            {units
                .iter()
                .map(|unit| view! {
                    <option value=*unit selected={move || form.with(get) == *unit}>{*unit}</option>
                })
                .collect_view()}
        </select>
    }
}

#[component]
fn ImporterFormView(
    initial: ImporterForm,
    is_edit: bool,
    #[prop(into)] existing_names: Signal<Vec<String>>,
) -> impl IntoView {
    let form = RwSignal::new(initial);
    let step = RwSignal::new(FormStep::default());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let save_error = RwSignal::new(None::<String>);
    let is_saving = RwSignal::new(false);
    let navigate = StoredValue::new_local(use_navigate());

    let check = move |current: FormStep| {
        let found = form.with_untracked(|f| {
            existing_names.with_untracked(|names| f.validate_step(current, names, is_edit))
        });
        let is_valid = found.is_empty();
        errors.set(found);
        is_valid
    };
    let go_next = move |_| {
        let current = step.get_untracked();
        if check(current) {
            if let Some(next) = current.next() {
                step.set(next);
            }
        }
    };
    let go_back = move |_| {
        if let Some(previous) = step.get_untracked().previous() {
            errors.set(Vec::new());
            step.set(previous);
        }
    };
    let save = move |_| {
        if !check(FormStep::Review) {
            return;
        }
        let Some(configuration) = form.with_untracked(ImporterForm::to_configuration) else {
            return;
        };
        let name = form.with_untracked(|f| f.name.trim().to_string());
        is_saving.set(true);
        save_error.set(None);
        spawn_local(async move {
            let result = if is_edit {
                update_importer(&name, &configuration).await
            } else {
                create_importer(&name, &configuration).await
            };
            match result {
                Ok(()) => {
                    let verb = if is_edit { "saved" } else { "created" };
                    log::info!("Importer {} was successfully {}.", name, verb);
                    navigate.with_value(|nav| nav("/importers", Default::default()));
                }
                Err(e) => {
                    log::warn!("saving importer {} failed: {}", name, e);
                    let what = if is_edit { "Failed to save Importer" } else { "Failed to create Importer" };
                    save_error.set(Some(format!("{}: {}", what, e)));
                }
            }
            is_saving.set(false);
        });
    };

    let has = move |field: ConfigField| move || form.with(|f| f.has_field(field));
    let on_step = move |s: FormStep| move || step.get() == s;

    view! {
        <div class="form">
            <ol class="form__steps">
                {FormStep::all()
                    .into_iter()
                    .map(|s| view! {
                        <li class=move || {
                            if step.get() == s { "form__step form__step--active" } else { "form__step" }
                        }>
                            {s.label()}
                        </li>
                    })
                    .collect_view()}
            </ol>

            <Show when=on_step(FormStep::General)>
                <FieldRow label="Type" field="type" errors=errors>
                    <select
                        class="form__select"
                        disabled=is_edit
                        on:change=move |ev| {
                            let code = event_target_value(&ev);
                            form.update(|f| {
                                f.importer_type = ImporterType::all().into_iter().find(|t| t.code() == code)
                            });
                        }
                    >
                        <option value="" selected={move || form.with(|f| f.importer_type.is_none())}>"Select a type"</option>
                        {ImporterType::all()
                            .into_iter()
                            .map(|t| view! {
                                <option value=t.code() selected={move || form.with(|f| f.importer_type == Some(t))}>
                                    {t.display_name()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </FieldRow>
                <TextField
                    label="Name" field="name" form=form errors=errors disabled=is_edit
                    get={|f| f.name.clone()} set={|f, v| f.name = v}
                />
                <TextField
                    label="Description" field="description" form=form errors=errors multiline=true
                    get={|f| f.description.clone()} set={|f, v| f.description = v}
                />
                <CheckField label="Enabled" form=form get={|f| f.enabled} set={|f, v| f.enabled = v} />
                <TextField
                    label="Labels" field="labels" form=form errors=errors multiline=true help="One key=value per line"
                    get={|f| f.labels.clone()} set={|f, v| f.labels = v}
                />
            </Show>

            <Show when=on_step(FormStep::Configuration)>
                <TextField
                    label="Source" field="source" form=form errors=errors
                    get={|f| f.source.clone()} set={|f, v| f.source = v}
                />
                <FieldRow label="Period" field="period" errors=errors help="Time between runs">
                    <input
                        class="form__input form__input--short"
                        type="number"
                        min="1"
                        prop:value=move || form.with(|f| f.period_value.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.period_value = value);
                        }
                    />
                    {unit_select(form, &PERIOD_UNITS, |f| f.period_unit.clone(), |f, v| f.period_unit = v)}
                </FieldRow>
                <Show when=has(ConfigField::V3Signatures)>
                    <CheckField label="Enable v3 signatures" form=form get={|f| f.v3_signatures} set={|f, v| f.v3_signatures = v} />
                </Show>
                <Show when=has(ConfigField::IgnoreMissing)>
                    <CheckField label="Ignore missing" form=form get={|f| f.ignore_missing} set={|f, v| f.ignore_missing = v} />
                </Show>
                <Show when=has(ConfigField::FetchRetries)>
                    <TextField
                        label="Fetch retries" field="fetchRetries" form=form errors=errors
                        get={|f| f.fetch_retries.clone()} set={|f, v| f.fetch_retries = v}
                    />
                </Show>
                <Show when=has(ConfigField::SizeLimit)>
                    <FieldRow label="Size limit" field="sizeLimit" errors=errors>
                        <input
                            class="form__input form__input--short"
                            type="text"
                            prop:value=move || form.with(|f| f.size_limit_value.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.size_limit_value = value);
                            }
                        />
                        {unit_select(form, &SIZE_LIMIT_UNITS, |f| f.size_limit_unit.clone(), |f, v| f.size_limit_unit = v)}
                    </FieldRow>
                </Show>
                <Show when=has(ConfigField::OnlyPatterns)>
                    <TextField
                        label="Only patterns" field="onlyPatterns" form=form errors=errors multiline=true
                        help="Regular expressions, one per line"
                        get={|f| f.only_patterns.clone()} set={|f, v| f.only_patterns = v}
                    />
                </Show>
                <Show when=has(ConfigField::Keys)>
                    <TextField
                        label="Keys" field="keys" form=form errors=errors multiline=true help="Key URLs, one per line"
                        get={|f| f.keys.clone()} set={|f, v| f.keys = v}
                    />
                </Show>
                <Show when=has(ConfigField::Branch)>
                    <TextField
                        label="Branch" field="branch" form=form errors=errors
                        get={|f| f.branch.clone()} set={|f, v| f.branch = v}
                    />
                </Show>
                <Show when=has(ConfigField::Path)>
                    <TextField
                        label="Path" field="path" form=form errors=errors
                        get={|f| f.path.clone()} set={|f, v| f.path = v}
                    />
                </Show>
                <Show when=has(ConfigField::StartYear)>
                    <TextField
                        label="Start year" field="startYear" form=form errors=errors
                        get={|f| f.start_year.clone()} set={|f, v| f.start_year = v}
                    />
                </Show>
                <Show when=has(ConfigField::Years)>
                    <TextField
                        label="Years" field="years" form=form errors=errors help="Comma separated"
                        get={|f| f.years.clone()} set={|f, v| f.years = v}
                    />
                </Show>
                <Show when=has(ConfigField::ApiToken)>
                    <TextField
                        label="API token" field="apiToken" form=form errors=errors secret=true
                        get={|f| f.api_token.clone()} set={|f, v| f.api_token = v}
                    />
                </Show>
                <Show when=has(ConfigField::Namespace)>
                    <TextField
                        label="Namespace" field="namespace" form=form errors=errors
                        get={|f| f.namespace.clone()} set={|f, v| f.namespace = v}
                    />
                </Show>
                <Show when=has(ConfigField::Concurrency)>
                    <TextField
                        label="Concurrency" field="concurrency" form=form errors=errors
                        get={|f| f.concurrency.clone()} set={|f, v| f.concurrency = v}
                    />
                </Show>
            </Show>

            <Show when=on_step(FormStep::Review)>
                <dl class="details__grid">
                    {move || {
                        form.with(ImporterForm::review_entries)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div class="details__field">
                                    <dt>{label}</dt>
                                    <dd>{value}</dd>
                                </div>
                            })
                            .collect_view()
                    }}
                </dl>
                {move || {
                    let found = errors.get();
                    (!found.is_empty()).then(|| view! {
                        <ul class="alert alert--error">
                            {found.into_iter().map(|e| view! { <li>{e.to_string()}</li> }).collect_view()}
                        </ul>
                    })
                }}
            </Show>

            {move || save_error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <div class="form__actions">
                <button
                    class="button button--secondary"
                    disabled=move || step.get().previous().is_none()
                    on:click=go_back
                >
                    "Back"
                </button>
                <Show
                    when=move || step.get().next().is_some()
                    fallback=move || view! {
                        <button
                            class="button button--primary"
                            disabled=move || is_saving.get()
                            on:click=save
                        >
                            {if is_edit { "Save" } else { "Create" }}
                        </button>
                    }
                >
                    <button class="button button--primary" on:click=go_next>"Next"</button>
                </Show>
                <A href="/importers" attr:class="button button--link">"Cancel"</A>
            </div>
        </div>
    }
}
