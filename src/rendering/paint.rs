//! Paint command lists for the grid and progress views.
//!
//! The engine first describes a frame as a list of [`PaintCommand`]s and then
//! replays it onto the host surface.

use crate::rendering::layout::GridLayout;
use crate::rendering::{Rect, Rgba, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill the whole target
    Clear { rgba: Rgba },
    /// Draw the surface of panel `index` scaled into `rect`
    Panel {
        index: u32,
        rect: Rect,
    },
    /// Centered single-line text
    Text {
        cx: i32,
        cy: i32,
        text: String,
        rgba: Rgba,
    },
}

/// Commands for the grid overview of `panel_count` panels.
///
/// Panels past the grid capacity get no command.
pub fn grid_commands(layout: &GridLayout, panel_count: u32, background: Rgba) -> Vec<PaintCommand> {
    let mut cmds = Vec::with_capacity(1 + panel_count.min(layout.capacity()) as usize);
    cmds.push(PaintCommand::Clear { rgba: background });
    cmds.extend(
        layout
            .cells(panel_count)
            .map(|(index, rect)| PaintCommand::Panel { index, rect }),
    );
    cmds
}

/// Progress label, e.g. `"4 / 12"`.
pub fn progress_label(created: u32, max: u32) -> String {
    format!("{} / {}", created, max)
}

/// Commands for the centered capture progress indicator.
pub fn progress_commands(
    width: u32,
    height: u32,
    created: u32,
    max: u32,
    background: Rgba,
    text: Rgba,
) -> Vec<PaintCommand> {
    vec![
        PaintCommand::Clear { rgba: background },
        PaintCommand::Text {
            cx: (width / 2) as i32,
            cy: (height / 2) as i32,
            text: progress_label(created, max),
            rgba: text,
        },
    ]
}

/// Replay `commands` onto `target`, resolving panel indices via `panel`.
///
/// Commands referring to an unknown panel are skipped.
pub fn replay<'a, S, F>(commands: &[PaintCommand], target: &mut S, panel: F)
where
    S: Surface + 'a,
    F: Fn(u32) -> Option<&'a S>,
{
    for cmd in commands {
        match cmd {
            PaintCommand::Clear { rgba } => target.clear(*rgba),
            PaintCommand::Panel { index, rect } => {
                if let Some(src) = panel(*index) {
                    target.draw_surface(src, *rect);
                }
            }
            PaintCommand::Text { cx, cy, text, rgba } => target.fill_text(text, *cx, *cy, *rgba),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;

    #[test]
    fn grid_commands_stop_at_capacity() {
        let layout = GridLayout::new(Viewport { width: 340, height: 230 }, 3, 2, 10);
        let cmds = grid_commands(&layout, 9, Rgba::BLACK);
        assert_eq!(cmds.len(), 1 + 6);
        assert_eq!(cmds[0], PaintCommand::Clear { rgba: Rgba::BLACK });
        match &cmds[6] {
            PaintCommand::Panel { index, .. } => assert_eq!(*index, 5),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn progress_is_centered() {
        let cmds = progress_commands(200, 100, 4, 12, Rgba::BLACK, Rgba::WHITE);
        match &cmds[1] {
            PaintCommand::Text { cx, cy, text, .. } => {
                assert_eq!((*cx, *cy), (100, 50));
                assert_eq!(text, "4 / 12");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
