//! Application shell: a post cover editor built around the drop zone.
//!
//! Owns the process-wide [`Preferences`] (loaded once at startup, saved on
//! every change) and hands them to the component tree through a context.

use common::ingest::FileHandle;
use common::model::preferences::Preferences;
use gloo_file::futures::read_as_bytes;
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::drop_zone::DropZone;
use crate::config::{load_preferences, save_preferences};
use crate::helpers::{data_url, show_toast, size_label};
use crate::platform::BrowserFile;
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};

/// Image currently chosen as the post cover.
#[derive(Clone, PartialEq)]
pub struct CoverImage {
    pub name: String,
    pub size: u64,
    pub data_url: String,
}

pub enum AppMsg {
    ToggleDarkMode,
    FilesDropped { accepted: usize, rejected: usize },
    UrlDropped(String),
    FileSelected(Vec<BrowserFile>),
    CoverLoaded(CoverImage),
    DropError(String),
    OpenPreview,
    RemoveCover,
}

pub struct App {
    preferences: Preferences,
    cover: Option<CoverImage>,
    loading_cover: bool,
    preview_dialog_ref: NodeRef,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            preferences: load_preferences(),
            cover: None,
            loading_cover: false,
            preview_dialog_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::ToggleDarkMode => {
                self.preferences = self.preferences.toggled_dark_mode();
                save_preferences(&self.preferences);
                true
            }
            AppMsg::FilesDropped { accepted, rejected } => {
                if accepted > 0 && rejected > 0 {
                    show_toast(&format!("Se ignoraron {} archivo(s) no válidos.", rejected));
                }
                false
            }
            AppMsg::UrlDropped(url) => {
                info!("image link dropped: {url}");
                show_toast("Descargando imagen desde el enlace...");
                false
            }
            AppMsg::FileSelected(files) => {
                let Some(file) = files.into_iter().next() else {
                    return false;
                };
                self.loading_cover = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let name = file.name();
                    let content_type = file.mime_type();
                    let size = file.size();
                    match read_as_bytes(&file.0).await {
                        Ok(bytes) => link.send_message(AppMsg::CoverLoaded(CoverImage {
                            name,
                            size,
                            data_url: data_url(&content_type, &bytes),
                        })),
                        Err(e) => {
                            warn!("could not read {name}: {:?}", e);
                            link.send_message(AppMsg::DropError(format!(
                                "No se pudo leer el archivo {}.",
                                name
                            )));
                        }
                    }
                });
                true
            }
            AppMsg::CoverLoaded(cover) => {
                self.loading_cover = false;
                self.cover = Some(cover);
                true
            }
            AppMsg::DropError(message) => {
                self.loading_cover = false;
                show_toast(&message);
                true
            }
            AppMsg::OpenPreview => {
                open_top_sheet(self.preview_dialog_ref.clone());
                false
            }
            AppMsg::RemoveCover => {
                self.cover = None;
                close_top_sheet(self.preview_dialog_ref.clone());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let theme_icon = if self.preferences.dark_mode {
            "light_mode"
        } else {
            "dark_mode"
        };

        html! {
            <ContextProvider<Preferences> context={self.preferences.clone()}>
                <div class={classes!("app-root", self.preferences.theme_class())}>
                    <header class="app-header">
                        <h1>{ "Nueva entrada" }</h1>
                        <button class="icon-btn" onclick={link.callback(|_| AppMsg::ToggleDarkMode)}>
                            <i class="material-icons">{ theme_icon }</i>
                            <span class="icon-label">{ "Tema" }</span>
                        </button>
                    </header>
                    <section class="cover-editor">
                        <DropZone
                            on_files_drop={link.callback(|(accepted, rejected): (Vec<BrowserFile>, Vec<BrowserFile>)| {
                                AppMsg::FilesDropped { accepted: accepted.len(), rejected: rejected.len() }
                            })}
                            on_url_drop={link.callback(AppMsg::UrlDropped)}
                            on_error={link.callback(AppMsg::DropError)}
                            on_file_select={link.callback(AppMsg::FileSelected)}
                        >
                            { self.cover_thumbnail(link) }
                        </DropZone>
                    </section>
                    { self.preview_dialog(link) }
                </div>
            </ContextProvider<Preferences>>
        }
    }
}

impl App {
    fn cover_thumbnail(&self, link: &yew::html::Scope<Self>) -> Html {
        if self.loading_cover {
            return html! { <div class="cover-loading">{ "Cargando imagen..." }</div> };
        }
        match &self.cover {
            Some(cover) => html! {
                <div class="cover-thumbnail">
                    <img
                        src={cover.data_url.clone()}
                        alt={cover.name.clone()}
                        style="max-width:200px;max-height:200px;vertical-align:middle;"
                        onclick={link.callback(|e: MouseEvent| {
                            e.stop_propagation();
                            AppMsg::OpenPreview
                        })}
                    />
                    <span class="cover-caption">
                        { format!("{} ({})", cover.name, size_label(cover.size)) }
                    </span>
                </div>
            },
            None => html! {},
        }
    }

    fn preview_dialog(&self, link: &yew::html::Scope<Self>) -> Html {
        let dialog_ref = self.preview_dialog_ref.clone();
        html! {
            <YwMaterialTopSheet node_ref={dialog_ref.clone()}>
                <div style="position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.85);z-index:9999;display:flex;flex-direction:column;align-items:center;justify-content:center;">
                    <button
                        onclick={Callback::from(move |_| close_top_sheet(dialog_ref.clone()))}
                        style="position:absolute;top:24px;right:32px;z-index:10000;padding:0.5rem 1rem;font-size:1.5rem;background:#fff;border:none;border-radius:4px;cursor:pointer;"
                    >
                        { "✕" }
                    </button>
                    {
                        match &self.cover {
                            Some(cover) => html! {
                                <>
                                    <img src={cover.data_url.clone()} style="max-width:600px;max-height:600px;margin-bottom:24px;" />
                                    <button
                                        style="padding:0.5rem 1rem;font-size:1rem;background:#d32f2f;color:#fff;border:none;border-radius:4px;cursor:pointer;"
                                        onclick={link.callback(|_| AppMsg::RemoveCover)}
                                    >
                                        { "Quitar portada" }
                                    </button>
                                </>
                            },
                            None => html! { <span style="color:#fff;">{ "No hay imagen seleccionada" }</span> },
                        }
                    }
                </div>
            </YwMaterialTopSheet>
        }
    }
}
