//! Modal popup dialogs: a centered box with a title bar, caller-provided
//! contents, and an OK/Cancel button row. Pushed as transparent layers so
//! the screen beneath stays visible, dimmed and inert.

use std::any::Any;

use bower_core::layout::{FrameLayout, LinearLayout};
use bower_core::{
    DialogResult, DrawContext, Drawable, EventKind, InputState, Key, KeyInput, LayoutParams,
    Screen, ScreenCx, SizeReq, TouchFlags, TouchInput, UiEvent, View, ViewHost, ViewId,
};
use geom::Bounds;

use crate::base::{Button, Label, PopupHeader};
use crate::list::{ListView, StringVectorAdaptor};

/// Width of the popup box.
const POPUP_WIDTH: f32 = 550.0;
/// Width of the OK/Cancel button row.
const BUTTON_ROW_WIDTH: f32 = 200.0;
/// Popup box background color.
const POPUP_BG: u32 = 0xFF30_3030;
/// Height of the scrolling list inside a [`ListPopup`].
const LIST_HEIGHT: f32 = 300.0;

/// Ids of the chrome views a popup builds around its contents.
#[derive(Debug, Clone, Copy)]
struct PopupIds {
    box_id: ViewId,
    ok: ViewId,
    cancel: ViewId,
}

/// The shared shell of every popup: view hosting, the centered box, the
/// title bar and button row, and the dismissal paths (buttons, Escape, and
/// tapping outside the box).
struct PopupFrame {
    host: ViewHost,
    title: String,
    ids: Option<PopupIds>,
}

impl PopupFrame {
    fn new(title: impl Into<String>) -> Self {
        Self {
            host: ViewHost::new(),
            title: title.into(),
            ids: None,
        }
    }

    /// Build the view tree if needed, letting `contents` populate the box
    /// between the title bar and the buttons.
    fn ensure(&mut self, contents: impl FnOnce(&mut LinearLayout)) {
        let title = self.title.clone();
        let mut built = None;
        self.host.ensure_views(|| {
            let mut root =
                FrameLayout::new(LayoutParams::plain(SizeReq::FillParent, SizeReq::FillParent));

            let mut package = LinearLayout::vertical(LayoutParams::plain(
                SizeReq::Exact(POPUP_WIDTH),
                SizeReq::WrapContent,
            ));
            package.set_spacing(0.0);
            package.group_mut().set_bg(Drawable::new(POPUP_BG));
            package.group_mut().set_drop_shadow(true);
            package.add_view(PopupHeader::new(title));
            contents(&mut package);

            let mut buttons = LinearLayout::horizontal(LayoutParams::plain(
                SizeReq::Exact(BUTTON_ROW_WIDTH),
                SizeReq::WrapContent,
            ));
            buttons.set_spacing(0.0);
            let ok = buttons.add_view(Button::with_params(
                "OK",
                LayoutParams::linear(SizeReq::FillParent, SizeReq::WrapContent, 1.0),
            ));
            let cancel = buttons.add_view(Button::with_params(
                "Cancel",
                LayoutParams::linear(SizeReq::FillParent, SizeReq::WrapContent, 1.0),
            ));
            package.add_view(buttons);

            let box_id = root.add_view(package);
            built = Some(PopupIds { box_id, ok, cancel });
            Box::new(root)
        });
        if let Some(ids) = built {
            self.ids = Some(ids);
        }
    }

    /// Map a bubbled event to a dialog result, if it came from the chrome.
    fn chrome_result(&self, event: &UiEvent) -> Option<DialogResult> {
        let ids = self.ids?;
        if event.source == ids.ok {
            Some(DialogResult::Ok)
        } else if event.source == ids.cancel {
            Some(DialogResult::Cancel)
        } else {
            None
        }
    }

    /// The popup box's laid-out bounds, once views exist.
    fn box_bounds(&mut self) -> Option<Bounds> {
        let box_id = self.ids?.box_id;
        self.host
            .root_mut()
            .and_then(|root| root.as_container())
            .and_then(|group| group.bounds_of(box_id))
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut ScreenCx) -> Vec<UiEvent> {
        if touch.flags == TouchFlags::Down
            && let Some(bounds) = self.box_bounds()
            && !bounds.contains(touch.x, touch.y)
        {
            cx.finish_dialog(DialogResult::Cancel);
            return Vec::new();
        }
        self.host.touch(touch)
    }

    fn key(&mut self, key: &KeyInput, cx: &mut ScreenCx) -> Vec<UiEvent> {
        if key.down && key.key == Key::Escape {
            cx.finish_dialog(DialogResult::Cancel);
            return Vec::new();
        }
        self.host.key(key)
    }

    fn render(&mut self, dc: &mut dyn DrawContext, enabled: bool) {
        let (w, h) = dc.screen_size();
        self.host.render(dc, Bounds::new(0.0, 0.0, w, h), enabled);
    }
}

/// A popup showing a message with OK/Cancel.
pub struct MessagePopup {
    frame: PopupFrame,
    message: String,
}

impl MessagePopup {
    /// A message dialog.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            frame: PopupFrame::new(title),
            message: message.into(),
        }
    }

    fn handle(&mut self, events: Vec<UiEvent>, cx: &mut ScreenCx) {
        for event in events {
            if let Some(result) = self.frame.chrome_result(&event) {
                cx.finish_dialog(result);
            }
        }
    }
}

impl Screen for MessagePopup {
    fn update(&mut self, input: &InputState, cx: &mut ScreenCx) {
        let message = self.message.clone();
        self.frame.ensure(|package| {
            package.add_view(Label::with_params(
                message,
                LayoutParams::linear(SizeReq::FillParent, SizeReq::WrapContent, 0.0),
            ));
        });
        let events = self.frame.host.update(input);
        self.handle(events, cx);
    }

    fn render(&mut self, dc: &mut dyn DrawContext, enabled: bool) {
        self.frame.render(dc, enabled);
    }

    fn is_transparent(&self) -> bool {
        true
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut ScreenCx) {
        let events = self.frame.touch(touch, cx);
        self.handle(events, cx);
    }

    fn key(&mut self, key: &KeyInput, cx: &mut ScreenCx) {
        let events = self.frame.key(key, cx);
        self.handle(events, cx);
    }

    fn recreate_views(&mut self) {
        self.frame.host.request_recreate();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A popup offering a list of choices. Picking one finishes the dialog with
/// [`DialogResult::Ok`]; the caller reads [`ListPopup::selection`] from
/// `dialog_finished`.
pub struct ListPopup {
    frame: PopupFrame,
    choices: Vec<String>,
    initial: Option<usize>,
    list_id: Option<ViewId>,
    selection: Option<usize>,
}

impl ListPopup {
    /// A choice dialog over `choices`, optionally pre-selecting one.
    pub fn new(title: impl Into<String>, choices: Vec<String>, initial: Option<usize>) -> Self {
        Self {
            frame: PopupFrame::new(title),
            choices,
            initial,
            list_id: None,
            selection: initial,
        }
    }

    /// The index picked before the dialog finished, if any.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    fn handle(&mut self, events: Vec<UiEvent>, cx: &mut ScreenCx) {
        for event in events {
            if let Some(result) = self.frame.chrome_result(&event) {
                cx.finish_dialog(result);
            } else if self.list_id == Some(event.source)
                && let EventKind::Choice(index) = event.kind
            {
                self.selection = Some(index);
                cx.finish_dialog(DialogResult::Ok);
            }
        }
    }
}

impl Screen for ListPopup {
    fn update(&mut self, input: &InputState, cx: &mut ScreenCx) {
        let choices = self.choices.clone();
        let initial = self.initial;
        let mut list_id = None;
        self.frame.ensure(|package| {
            let adaptor = StringVectorAdaptor::new(choices, initial);
            list_id = Some(package.add_view(ListView::new(
                Box::new(adaptor),
                LayoutParams::linear(SizeReq::FillParent, SizeReq::Exact(LIST_HEIGHT), 0.0),
            )));
        });
        if list_id.is_some() {
            self.list_id = list_id;
        }
        let events = self.frame.host.update(input);
        self.handle(events, cx);
    }

    fn render(&mut self, dc: &mut dyn DrawContext, enabled: bool) {
        self.frame.render(dc, enabled);
    }

    fn is_transparent(&self) -> bool {
        true
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut ScreenCx) {
        let events = self.frame.touch(touch, cx);
        self.handle(events, cx);
    }

    fn key(&mut self, key: &KeyInput, cx: &mut ScreenCx) {
        let events = self.frame.key(key, cx);
        self.handle(events, cx);
    }

    fn recreate_views(&mut self) {
        self.frame.host.request_recreate();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use bower_core::{ScreenRequest, testing::TestDraw};

    use super::*;

    fn cx() -> ScreenCx {
        ScreenCx::default()
    }

    fn prime(screen: &mut dyn Screen) {
        let input = InputState::default();
        let mut cx = cx();
        screen.update(&input, &mut cx);
        let mut dc = TestDraw::new();
        screen.render(&mut dc, true);
    }

    fn finish_requests(cx: &mut ScreenCx) -> Vec<DialogResult> {
        cx.drain_requests()
            .into_iter()
            .filter_map(|r| match r {
                ScreenRequest::FinishDialog(result) => Some(result),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn popups_declare_themselves_transparent() {
        assert!(MessagePopup::new("Title", "Body").is_transparent());
        assert!(ListPopup::new("Pick", vec!["a".to_owned()], None).is_transparent());
    }

    #[test]
    fn escape_cancels_the_dialog() {
        let mut popup = MessagePopup::new("Title", "Body");
        prime(&mut popup);

        let mut cx = cx();
        popup.key(&KeyInput::down(Key::Escape), &mut cx);
        assert_eq!(finish_requests(&mut cx), [DialogResult::Cancel]);
    }

    #[test]
    fn tapping_outside_the_box_cancels() {
        let mut popup = MessagePopup::new("Title", "Body");
        prime(&mut popup);

        let mut cx = cx();
        popup.touch(&TouchInput::primary(1.0, 1.0, TouchFlags::Down), &mut cx);
        assert_eq!(finish_requests(&mut cx), [DialogResult::Cancel]);
    }

    #[test]
    fn tapping_inside_the_box_does_not_cancel() {
        let mut popup = MessagePopup::new("Title", "Body");
        prime(&mut popup);

        let bounds = popup.frame.box_bounds().unwrap();
        let mut cx = cx();
        popup.touch(
            &TouchInput::primary(bounds.center_x(), bounds.y + 1.0, TouchFlags::Down),
            &mut cx,
        );
        assert!(finish_requests(&mut cx).is_empty());
    }

    #[test]
    fn ok_button_finishes_with_ok() {
        let mut popup = MessagePopup::new("Title", "Body");
        prime(&mut popup);

        let ok = popup.frame.ids.unwrap().ok;
        let bounds = popup
            .frame
            .host
            .root_mut()
            .map(|root| bounds_of_deep(root, ok).unwrap())
            .unwrap();

        let mut cx = cx();
        popup.touch(
            &TouchInput::primary(bounds.center_x(), bounds.center_y(), TouchFlags::Down),
            &mut cx,
        );
        popup.touch(
            &TouchInput::primary(bounds.center_x(), bounds.center_y(), TouchFlags::Up),
            &mut cx,
        );
        assert_eq!(finish_requests(&mut cx), [DialogResult::Ok]);
    }

    #[test]
    fn picking_a_list_entry_finishes_with_ok() {
        let mut popup = ListPopup::new(
            "Pick one",
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            None,
        );
        prime(&mut popup);

        let list_id = popup.list_id.unwrap();
        let row = popup
            .frame
            .host
            .root_mut()
            .and_then(|root| {
                let list = find_deep(root, list_id)?;
                let list = list.as_any_mut().downcast_mut::<ListView>()?;
                let column = list.as_container_mut()?.view_by_index_mut(0)?;
                let column = column.as_container()?;
                column.views().get(1).map(|v| v.state().bounds)
            })
            .unwrap();

        let mut cx = cx();
        popup.touch(
            &TouchInput::primary(row.center_x(), row.center_y(), TouchFlags::Down),
            &mut cx,
        );
        popup.touch(
            &TouchInput::primary(row.center_x(), row.center_y(), TouchFlags::Up),
            &mut cx,
        );
        assert_eq!(finish_requests(&mut cx), [DialogResult::Ok]);
        assert_eq!(popup.selection(), Some(1));
    }

    /// Depth-first search for a view's bounds anywhere under `root`.
    fn bounds_of_deep(root: &mut dyn View, id: ViewId) -> Option<Bounds> {
        if root.state().id == id {
            return Some(root.state().bounds);
        }
        let group = root.as_container_mut()?;
        for view in group.views_mut() {
            if let Some(bounds) = bounds_of_deep(view.as_mut(), id) {
                return Some(bounds);
            }
        }
        None
    }

    /// Depth-first search for a view anywhere under `root`.
    fn find_deep(root: &mut dyn View, id: ViewId) -> Option<&mut dyn View> {
        if root.state().id == id {
            return Some(root);
        }
        let group = root.as_container_mut()?;
        for view in group.views_mut() {
            if let Some(found) = find_deep(view.as_mut(), id) {
                return Some(found);
            }
        }
        None
    }
}
