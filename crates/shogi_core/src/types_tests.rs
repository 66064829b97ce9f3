use super::*;

#[test]
fn test_square_helpers() {
    // 1a is index 0, 9a is index 8, 1i is index 72
    assert_eq!(sq(1, 1), Some(0));
    assert_eq!(sq(9, 1), Some(8));
    assert_eq!(sq(1, 9), Some(72));
    assert_eq!(sq(9, 9), Some(80));

    assert_eq!(file_of(60), 7);
    assert_eq!(rank_of(60), 7);

    // Out-of-range coordinates
    assert_eq!(sq(0, 5), None);
    assert_eq!(sq(5, 10), None);
}

#[test]
fn test_square_roundtrip() {
    for square in 0..NUM_SQUARES as u8 {
        assert_eq!(sq(file_of(square), rank_of(square)), Some(square));
        assert_eq!(usi_to_sq(&sq_to_usi(square)), Some(square));
    }
}

#[test]
fn test_usi_parsing() {
    assert_eq!(usi_to_sq("7g"), sq(7, 7));
    assert_eq!(usi_to_sq("1a"), Some(0));
    assert_eq!(usi_to_sq("9i"), Some(80));
    assert_eq!(usi_to_sq("0a"), None);
    assert_eq!(usi_to_sq("7j"), None);
    assert_eq!(usi_to_sq("7"), None);
    assert_eq!(usi_to_sq("7gg"), None);
}

#[test]
fn test_color_other() {
    assert_eq!(Color::Black.other(), Color::White);
    assert_eq!(Color::White.other(), Color::Black);
}

#[test]
fn test_move_destination() {
    let mv = Move::Normal {
        from: 60,
        to: 51,
        promotion: false,
    };
    assert_eq!(mv.to(), 51);

    let drop = Move::Drop {
        kind: PieceKind::Knight,
        to: 40,
    };
    assert_eq!(drop.to(), 40);
}
