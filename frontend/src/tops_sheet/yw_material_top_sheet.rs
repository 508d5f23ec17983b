use gloo_timers::callback::Timeout;
use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// Class toggled on the sheet to slide it in.
const SHOW_CLASS: &str = "show";

/// Delay before toggling, so the transition runs after the sheet is in the DOM.
const TOGGLE_DELAY_MS: u32 = 50;

pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(top_sheet_ref, false);
}

fn toggle_show(top_sheet_ref: NodeRef, show: bool) {
    let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() else {
        return;
    };
    Timeout::new(TOGGLE_DELAY_MS, move || {
        let classes = top_sheet.class_list();
        let result = if show {
            classes.add_1(SHOW_CLASS)
        } else {
            classes.remove_1(SHOW_CLASS)
        };
        if let Err(e) = result {
            log::warn!("could not toggle top sheet: {:?}", e);
        }
    })
    .forget();
}
