//! Unit tests for nav-core.

#[cfg(test)]
mod field {
    use glam::IVec2;

    use crate::Field;

    #[test]
    fn new_fills_every_cell() {
        let f = Field::new(4, 3, 7i32);
        assert_eq!(f.width(), 4);
        assert_eq!(f.height(), 3);
        assert!(f.iter_cells().all(|(_, &v)| v == 7));
        assert_eq!(f.as_slice().len(), 12);
    }

    #[test]
    fn row_major_layout() {
        let mut f = Field::new(3, 2, 0i32);
        *f.at_mut(2, 0) = 1;
        *f.at_mut(0, 1) = 2;
        // Row y occupies [y * width, (y + 1) * width).
        assert_eq!(f.as_slice(), &[0, 0, 1, 2, 0, 0]);
    }

    #[test]
    fn checked_probe_off_grid() {
        let f = Field::new(4, 4, 0u8);
        assert!(f.get(IVec2::new(-1, 0)).is_none());
        assert!(f.get(IVec2::new(0, 4)).is_none());
        assert_eq!(f.get(IVec2::new(3, 3)), Some(&0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn panicking_access_off_grid() {
        let f = Field::new(4, 4, 0u8);
        let _ = f.at(4, 0);
    }

    #[test]
    fn iter_cells_order() {
        let f = Field::new(2, 2, 0u8);
        let cells: Vec<IVec2> = f.iter_cells().map(|(c, _)| c).collect();
        assert_eq!(
            cells,
            vec![
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(0, 1),
                IVec2::new(1, 1)
            ]
        );
    }
}

#[cfg(test)]
mod ids {
    use crate::NodeId;

    #[test]
    fn node_id_is_one_based() {
        let n = NodeId(3);
        assert_eq!(n.slot(), 2);
        assert_eq!(n.label(), 3);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }
}

#[cfg(test)]
mod vec {
    use glam::IVec2;

    use crate::{NEIGHBORS_8, path_length};

    #[test]
    fn path_length_diagonal_and_straight() {
        let cells = [IVec2::new(0, 0), IVec2::new(1, 1), IVec2::new(2, 1)];
        let len = path_length(&cells);
        assert!((len - (2.0f32.sqrt() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn path_length_degenerate() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[IVec2::new(5, 5)]), 0.0);
    }

    #[test]
    fn neighborhood_has_no_center_and_no_duplicates() {
        assert_eq!(NEIGHBORS_8.len(), 8);
        assert!(!NEIGHBORS_8.contains(&IVec2::ZERO));
        for (i, a) in NEIGHBORS_8.iter().enumerate() {
            assert!(!NEIGHBORS_8[i + 1..].contains(a));
        }
    }
}

#[cfg(test)]
mod config {
    use crate::MeshConfig;

    #[test]
    fn default_validates() {
        assert!(MeshConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_dimensions() {
        let cfg = MeshConfig { width: 0, ..MeshConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_clearance() {
        let cfg = MeshConfig { min_item_size: -1.0, ..MeshConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
