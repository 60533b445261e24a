//! Unit tests for wh-storage.
//!
//! Grids are built from small hand-written configs so every cell kind and
//! capacity in a test is visible at the call site.

#[cfg(test)]
mod helpers {
    use wh_core::{Coord, WarehouseConfig};

    use crate::{Grid, Item};

    /// A `width × height` floor with no docks: every cell is storage.
    pub fn storage_only(width: u32, height: u32, capacity: usize) -> Grid {
        Grid::new(&WarehouseConfig {
            grid_width:         width,
            grid_height:        height,
            inbound_cells:      0,
            outbound_cells:     0,
            max_items_per_cell: capacity,
            ..WarehouseConfig::default()
        })
    }

    /// Push items so that the stack reads `prefs` from top to bottom.
    pub fn stack(grid: &mut Grid, at: Coord, prefs: &[u8]) {
        for (i, &p) in prefs.iter().enumerate().rev() {
            grid.add_item(at, Item::with_preference(format!("{at}-{i}"), p)).unwrap();
        }
    }

    /// Preferences of the stack at `at`, top to bottom.
    pub fn prefs(grid: &Grid, at: Coord) -> Vec<u8> {
        grid.cell(at).unwrap().items().map(Item::preference).collect()
    }
}

// ── Item ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod item {
    use wh_core::SimRng;

    use crate::{Item, PREFERENCE_MAX, PREFERENCE_MIN};

    #[test]
    fn seeded_preference_is_stable() {
        let a = Item::new("ITEM042");
        let b = Item::new("ITEM042");
        assert_eq!(a.preference(), b.preference());
        assert!((PREFERENCE_MIN..=PREFERENCE_MAX).contains(&a.preference()));
    }

    #[test]
    fn seeded_preference_in_range_for_odd_codes() {
        for code in ["", "x", "with space", "ünïcödé", "A-1", "ZZZZZZZZZZZZZZZZZZZZZZZZ"] {
            let p = Item::new(code).preference();
            assert!((PREFERENCE_MIN..=PREFERENCE_MAX).contains(&p), "{code}: {p}");
        }
    }

    #[test]
    fn explicit_preference_is_clamped() {
        assert_eq!(Item::with_preference("a", 0).preference(), PREFERENCE_MIN);
        assert_eq!(Item::with_preference("a", 250).preference(), PREFERENCE_MAX);
        assert_eq!(Item::with_preference("a", 50).preference(), 50);
    }

    #[test]
    fn update_stays_bounded_and_small() {
        let mut rng = SimRng::new(7);
        let mut low = Item::with_preference("low", PREFERENCE_MIN);
        let mut high = Item::with_preference("high", PREFERENCE_MAX);
        for _ in 0..500 {
            let (lo_before, hi_before) = (low.preference(), high.preference());
            low.update_preference(&mut rng);
            high.update_preference(&mut rng);
            assert!(low.preference().abs_diff(lo_before) <= 5);
            assert!(high.preference().abs_diff(hi_before) <= 5);
            assert!((PREFERENCE_MIN..=PREFERENCE_MAX).contains(&low.preference()));
            assert!((PREFERENCE_MIN..=PREFERENCE_MAX).contains(&high.preference()));
        }
    }

    #[test]
    fn display() {
        assert_eq!(Item::with_preference("X1", 50).to_string(), "X1[50]");
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cell {
    use wh_core::Coord;

    use crate::{Cell, CellKind, Item, StorageError};

    fn storage(capacity: usize) -> Cell {
        Cell::new(Coord::new(1, 1), CellKind::Storage, capacity)
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut c = storage(5);
        c.add_item(Item::with_preference("a", 1)).unwrap();
        c.add_item(Item::with_preference("b", 2)).unwrap();
        assert_eq!(c.peek_top().unwrap().code(), "b");
        assert_eq!(c.remove_item().unwrap().code(), "b");
        assert_eq!(c.remove_item().unwrap().code(), "a");
        assert!(c.remove_item().is_none());
    }

    #[test]
    fn capacity_never_exceeded() {
        let mut c = storage(3);
        for i in 0..10 {
            let before: Vec<String> = c.items().map(|it| it.code().to_owned()).collect();
            let result = c.add_item(Item::with_preference(format!("i{i}"), 10));
            assert!(c.len() <= 3);
            if i >= 3 {
                match result {
                    Err(StorageError::CellFull { capacity, item, .. }) => {
                        assert_eq!(capacity, 3);
                        assert_eq!(item.code(), format!("i{i}"));
                    }
                    other => panic!("expected CellFull, got {other:?}"),
                }
                let after: Vec<String> = c.items().map(|it| it.code().to_owned()).collect();
                assert_eq!(before, after, "failed push must leave the stack unchanged");
            }
        }
        assert!(!c.has_capacity());
        assert_eq!(c.spare_capacity(), Some(0));
    }

    #[test]
    fn docks_are_uncapped() {
        let mut inbound = Cell::new(Coord::new(0, 0), CellKind::Inbound, 1);
        let mut outbound = Cell::new(Coord::new(9, 0), CellKind::Outbound, 1);
        for i in 0..50 {
            inbound.add_item(Item::with_preference(format!("in{i}"), 1)).unwrap();
            outbound.add_item(Item::with_preference(format!("out{i}"), 1)).unwrap();
        }
        assert_eq!(inbound.len(), 50);
        assert_eq!(outbound.capacity(), None);
        assert!(outbound.has_capacity());
    }

    #[test]
    fn take_item_scans_from_top() {
        let mut c = storage(5);
        c.add_item(Item::with_preference("dup", 10)).unwrap();
        c.add_item(Item::with_preference("other", 20)).unwrap();
        c.add_item(Item::with_preference("dup", 30)).unwrap();
        let taken = c.take_item("dup").unwrap();
        assert_eq!(taken.preference(), 30, "topmost match is removed first");
        assert_eq!(c.len(), 2);
        assert!(c.take_item("missing").is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn needs_resort_detects_inversion() {
        let mut c = storage(5);
        // Push bottom first: stack reads 90, 50, 10 top to bottom.
        for p in [10, 50, 90] {
            c.add_item(Item::with_preference(format!("p{p}"), p)).unwrap();
        }
        assert!(!c.needs_resort());
        c.add_item(Item::with_preference("low", 5)).unwrap();
        assert!(c.needs_resort());
    }

    #[test]
    fn equal_preferences_are_in_order() {
        let mut c = storage(5);
        for i in 0..3 {
            c.add_item(Item::with_preference(format!("e{i}"), 40)).unwrap();
        }
        assert!(!c.needs_resort());
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut c = storage(10);
        // Stack top to bottom: a30 b90 c30 d10
        for (code, p) in [("d", 10), ("c", 30), ("b", 90), ("a", 30)] {
            c.add_item(Item::with_preference(code, p)).unwrap();
        }
        c.sort_items_by_preference();
        let order: Vec<&str> = c.items().map(Item::code).collect();
        assert_eq!(order, ["b", "a", "c", "d"]);
        assert!(!c.needs_resort());
    }

    #[test]
    fn top_and_bottom_items() {
        let mut c = storage(10);
        for p in [40, 10, 70, 20] {
            c.add_item(Item::with_preference(format!("p{p}"), p)).unwrap();
        }
        let top: Vec<u8> = c.top_items(2).into_iter().map(Item::preference).collect();
        assert_eq!(top, [70, 40]);
        let bottom: Vec<u8> = c.bottom_items(2).into_iter().map(Item::preference).collect();
        assert_eq!(bottom, [10, 20]);
        assert_eq!(c.bottom_items(10).len(), 4);
        assert!(storage(1).top_items(3).is_empty());
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use wh_core::{Coord, SimRng, WarehouseConfig};

    use crate::{CellKind, Grid, Item, StorageError};

    fn default_grid() -> Grid {
        Grid::new(&WarehouseConfig::default())
    }

    #[test]
    fn layout_rules() {
        let g = default_grid();
        assert_eq!(g.get_cell(0, 0).unwrap().kind(), CellKind::Inbound);
        assert_eq!(g.get_cell(0, 4).unwrap().kind(), CellKind::Inbound);
        assert_eq!(g.get_cell(0, 5).unwrap().kind(), CellKind::Storage);
        assert_eq!(g.get_cell(9, 0).unwrap().kind(), CellKind::Outbound);
        assert_eq!(g.get_cell(9, 4).unwrap().kind(), CellKind::Outbound);
        assert_eq!(g.get_cell(9, 5).unwrap().kind(), CellKind::Storage);
        assert_eq!(g.get_cell(5, 0).unwrap().kind(), CellKind::Storage);
        assert_eq!(g.coords_of_kind(CellKind::Inbound).len(), 5);
        assert_eq!(g.coords_of_kind(CellKind::Outbound).len(), 5);
    }

    #[test]
    fn out_of_bounds_lookup() {
        let mut g = default_grid();
        assert!(g.get_cell(10, 0).is_none());
        assert!(g.get_cell(-1, 3).is_none());
        let err = g.add_item(Coord::new(20, 20), Item::new("x")).unwrap_err();
        assert!(matches!(err, StorageError::OutOfBounds(_)));
    }

    #[test]
    fn cells_keep_their_coordinates() {
        let g = default_grid();
        for cell in g.cells() {
            assert_eq!(g.cell(cell.coord()).unwrap().coord(), cell.coord());
        }
        assert_eq!(g.cells().count(), 100);
    }

    #[test]
    fn empty_storage_cell_respects_exclusions() {
        let mut g = super::helpers::storage_only(2, 1, 1);
        let mut rng = SimRng::new(3);
        g.add_item(Coord::new(0, 0), Item::new("full")).unwrap();
        assert_eq!(g.find_empty_storage_cell(&[], &mut rng), Some(Coord::new(1, 0)));
        assert_eq!(g.find_empty_storage_cell(&[Coord::new(1, 0)], &mut rng), None);
    }

    #[test]
    fn empty_storage_cell_never_picks_docks() {
        let g = default_grid();
        let mut rng = SimRng::new(11);
        for _ in 0..200 {
            let c = g.find_empty_storage_cell(&[], &mut rng).unwrap();
            assert_eq!(g.cell(c).unwrap().kind(), CellKind::Storage);
        }
    }

    #[test]
    fn empty_storage_cell_is_seed_reproducible() {
        let g = default_grid();
        let picks = |seed| {
            let mut rng = SimRng::new(seed);
            (0..10).map(|_| g.find_empty_storage_cell(&[], &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(picks(99), picks(99));
    }

    #[test]
    fn find_item_skips_outbound() {
        let mut g = default_grid();
        g.add_item(Coord::new(9, 0), Item::new("SHIPPED")).unwrap();
        assert!(g.find_item("SHIPPED").is_none());

        g.add_item(Coord::new(4, 4), Item::new("STORED")).unwrap();
        g.add_item(Coord::new(0, 2), Item::new("STORED")).unwrap();
        let (at, item) = g.find_item("STORED").unwrap();
        assert_eq!(at, Coord::new(0, 2), "inbound column is scanned first");
        assert_eq!(item.code(), "STORED");
        assert!(g.find_item("NOPE").is_none());
    }

    #[test]
    fn highest_preference_by_kind() {
        let mut g = default_grid();
        g.add_item(Coord::new(0, 0), Item::with_preference("IN", 99)).unwrap();
        g.add_item(Coord::new(3, 3), Item::with_preference("S1", 60)).unwrap();
        g.add_item(Coord::new(4, 4), Item::with_preference("S2", 60)).unwrap();
        g.add_item(Coord::new(5, 5), Item::with_preference("S3", 20)).unwrap();

        let (_, best) = g.highest_preference_item(&[CellKind::Storage]).unwrap();
        assert_eq!(best.code(), "S1", "first found wins ties");
        let (at, best) = g
            .highest_preference_item(&[CellKind::Storage, CellKind::Inbound])
            .unwrap();
        assert_eq!((at, best.code()), (Coord::new(0, 0), "IN"));
        assert!(g.highest_preference_item(&[CellKind::Outbound]).is_none());
    }

    #[test]
    fn resort_candidates_are_storage_only() {
        let mut g = default_grid();
        super::helpers::stack(&mut g, Coord::new(0, 0), &[10, 90]); // inbound
        super::helpers::stack(&mut g, Coord::new(3, 3), &[10, 90]); // storage
        super::helpers::stack(&mut g, Coord::new(4, 4), &[90, 10]); // sorted
        assert_eq!(g.cells_needing_resort(), vec![Coord::new(3, 3)]);
        assert_eq!(g.total_items(), 6);
    }

    #[test]
    fn evolution_touches_every_item() {
        let mut g = default_grid();
        for i in 0..20 {
            g.add_item(Coord::new(1 + i % 8, i / 8), Item::with_preference(format!("i{i}"), 50))
                .unwrap();
        }
        let mut rng = SimRng::new(5);
        for _ in 0..10 {
            g.evolve_preferences(&mut rng);
        }
        assert_eq!(g.total_items(), 20);
        let moved = g
            .cells()
            .flat_map(|c| c.items())
            .filter(|it| it.preference() != 50)
            .count();
        assert!(moved > 0);
    }
}

// ── Resort ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resort {
    use wh_core::{Coord, SimRng};

    use super::helpers::{prefs, stack, storage_only};
    use crate::{Item, StorageError};

    #[test]
    fn three_items_two_scratch_cells() {
        let mut g = storage_only(3, 1, 20);
        let target = Coord::new(0, 0);
        stack(&mut g, target, &[10, 90, 30]);

        let out = g.resort(target, &mut SimRng::new(1)).unwrap();

        assert_eq!(prefs(&g, target), [90, 30, 10]);
        assert!(out.complete);
        assert_eq!(out.moved, 3);
        assert!(!g.cell(target).unwrap().needs_resort());
        for c in [Coord::new(1, 0), Coord::new(2, 0)] {
            assert!(g.cell(c).unwrap().is_empty(), "scratch {c} released");
        }
    }

    #[test]
    fn preserves_multiset_and_ties() {
        let mut g = storage_only(4, 4, 6);
        let target = Coord::new(1, 1);
        stack(&mut g, target, &[30, 70, 30, 5, 70, 50]);
        let before: Vec<String> = {
            let mut v: Vec<String> = g.cell(target).unwrap().items().map(|i| i.code().to_owned()).collect();
            v.sort();
            v
        };
        let codes_top_down: Vec<String> =
            g.cell(target).unwrap().items().map(|i| i.code().to_owned()).collect();

        let out = g.resort(target, &mut SimRng::new(8)).unwrap();
        assert!(out.complete);
        assert_eq!(prefs(&g, target), [70, 70, 50, 30, 30, 5]);

        let after_order: Vec<String> =
            g.cell(target).unwrap().items().map(|i| i.code().to_owned()).collect();
        // Equal preferences keep their original top-to-bottom order.
        assert_eq!(after_order[0], codes_top_down[1]);
        assert_eq!(after_order[1], codes_top_down[4]);
        assert_eq!(after_order[3], codes_top_down[0]);
        assert_eq!(after_order[4], codes_top_down[2]);

        let mut after = after_order.clone();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(g.total_items(), 6);
    }

    #[test]
    fn scratch_goods_are_untouched() {
        let mut g = storage_only(2, 1, 10);
        let target = Coord::new(0, 0);
        let scratch = Coord::new(1, 0);
        g.add_item(scratch, Item::with_preference("resident", 1)).unwrap();
        stack(&mut g, target, &[20, 80]);

        let out = g.resort(target, &mut SimRng::new(2)).unwrap();
        assert!(out.complete);
        assert_eq!(out.scratch_cells, vec![scratch]);
        assert_eq!(prefs(&g, target), [80, 20]);
        let left: Vec<&str> = g.cell(scratch).unwrap().items().map(Item::code).collect();
        assert_eq!(left, ["resident"]);
    }

    #[test]
    fn scarcity_is_partial_but_lossless() {
        let mut g = storage_only(2, 1, 3);
        let target = Coord::new(0, 0);
        let scratch = Coord::new(1, 0);
        g.add_item(scratch, Item::with_preference("r1", 50)).unwrap();
        g.add_item(scratch, Item::with_preference("r2", 50)).unwrap();
        stack(&mut g, target, &[10, 90, 30]);
        let total = g.total_items();

        let out = g.resort(target, &mut SimRng::new(4)).unwrap();

        assert!(!out.complete);
        assert_eq!(out.moved, 1);
        assert_eq!(g.total_items(), total);
        assert_eq!(g.cell(scratch).unwrap().len(), 2);
        assert!(g.cell(target).unwrap().needs_resort(), "left eligible for retry");
    }

    #[test]
    fn no_spare_capacity_at_all() {
        let mut g = storage_only(1, 1, 5);
        let target = Coord::new(0, 0);
        stack(&mut g, target, &[1, 2, 3]);
        let out = g.resort(target, &mut SimRng::new(0)).unwrap();
        assert_eq!(out.moved, 0);
        assert!(!out.complete);
        assert_eq!(prefs(&g, target), [1, 2, 3]);
    }

    #[test]
    fn scratch_cells_fill_before_fresh_pick() {
        let mut g = storage_only(4, 1, 2);
        let target = Coord::new(0, 0);
        stack(&mut g, target, &[1, 2]);
        let mut g2 = storage_only(4, 1, 4);
        stack(&mut g2, target, &[4, 1, 3, 2]);

        let out = g.resort(target, &mut SimRng::new(6)).unwrap();
        assert_eq!(out.scratch_cells.len(), 1);
        assert_eq!(prefs(&g, target), [2, 1]);

        let out2 = g2.resort(target, &mut SimRng::new(6)).unwrap();
        assert!(out2.complete);
        assert_eq!(out2.scratch_cells.len(), 1);
        assert_eq!(prefs(&g2, target), [4, 3, 2, 1]);
    }

    #[test]
    fn multiple_scratch_cells_when_small() {
        let mut g = storage_only(4, 1, 3);
        let target = Coord::new(0, 0);
        stack(&mut g, target, &[5, 40, 20]);
        for c in [Coord::new(1, 0), Coord::new(2, 0), Coord::new(3, 0)] {
            g.add_item(c, Item::with_preference(format!("res{c}"), 1)).unwrap();
            g.add_item(c, Item::with_preference(format!("res2{c}"), 1)).unwrap();
        }
        // Every scratch cell has exactly one free slot.
        let out = g.resort(target, &mut SimRng::new(12)).unwrap();
        assert!(out.complete);
        assert_eq!(out.scratch_cells.len(), 3);
        assert_eq!(prefs(&g, target), [40, 20, 5]);
        assert_eq!(g.total_items(), 9);
    }

    #[test]
    fn idempotent_on_sorted_cell() {
        let mut g = storage_only(3, 3, 10);
        let target = Coord::new(1, 1);
        stack(&mut g, target, &[9, 7, 7, 3]);
        g.resort(target, &mut SimRng::new(1)).unwrap();
        let once = prefs(&g, target);
        g.resort(target, &mut SimRng::new(2)).unwrap();
        assert_eq!(prefs(&g, target), once);
        assert_eq!(once, [9, 7, 7, 3]);
    }

    #[test]
    fn empty_target_is_trivially_complete() {
        let mut g = storage_only(2, 2, 4);
        let out = g.resort(Coord::new(0, 0), &mut SimRng::new(0)).unwrap();
        assert!(out.complete);
        assert_eq!(out.moved, 0);
        assert!(out.scratch_cells.is_empty());
    }

    #[test]
    fn out_of_bounds_target() {
        let mut g = storage_only(2, 2, 4);
        let err = g.resort(Coord::new(5, 5), &mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, StorageError::OutOfBounds(_)));
    }
}
