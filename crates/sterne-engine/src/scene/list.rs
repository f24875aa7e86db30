use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A recorded command with its paint-order key and the clip active when it
/// was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` draws everywhere.
    pub clip_rect: Option<Rect>,
}

/// Per-frame draw stream.
///
/// Cleared and refilled every frame; the item and index buffers keep their
/// capacity between frames.
///
/// Clips nest: [`push_clip`](Self::push_clip) intersects with the current
/// clip, and every push must be matched by a [`pop_clip`](Self::pop_clip).
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    // Top is the effective clip, already intersected with its parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
        self.clip_stack.clear();
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });
        self.sorted_dirty = true;
    }

    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect.normalized(),
            // Disjoint clips become zero-area so the renderer skips them.
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("DrawList::pop_clip without matching push_clip");
        }
    }

    /// Indices into [`items`](Self::items), back to front.
    pub fn indices_in_paint_order(&mut self) -> &[usize] {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        &self.sorted_indices
    }

    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn solid(list: &mut DrawList, z: i32, x: f32) {
        list.push_solid_rounded_rect(ZIndex(z), Rect::new(x, 0.0, 1.0, 1.0), 0.0, Color::WHITE);
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::RoundedRect(r) => r.rect.origin.x,
                DrawCmd::Text(t) => t.origin.x,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        solid(&mut list, 2, 0.0);
        solid(&mut list, 0, 1.0);
        solid(&mut list, 2, 2.0);
        solid(&mut list, 1, 3.0);
        assert_eq!(xs(&mut list), vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn items_inherit_current_clip() {
        let mut list = DrawList::new();
        solid(&mut list, 0, 0.0);
        list.push_clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        solid(&mut list, 0, 1.0);
        list.pop_clip();
        solid(&mut list, 0, 2.0);

        let clips: Vec<_> = list.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(clips, vec![None, Some(Rect::new(0.0, 0.0, 50.0, 50.0)), None]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        solid(&mut list, 0, 0.0);
        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn disjoint_nested_clip_is_empty() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 5.0, 5.0));
        solid(&mut list, 0, 0.0);
        assert!(list.items()[0].clip_rect.is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn unbalanced_pop_is_harmless() {
        let mut list = DrawList::new();
        list.pop_clip();
        solid(&mut list, 0, 0.0);
        assert_eq!(list.items()[0].clip_rect, None);
    }

    #[test]
    fn clear_resets_order_and_clips() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        solid(&mut list, 0, 0.0);
        list.clear();
        assert!(list.is_empty());
        solid(&mut list, 0, 5.0);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.items()[0].clip_rect, None);
        assert_eq!(list.indices_in_paint_order(), &[0]);
    }
}
