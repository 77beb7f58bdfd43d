use feature_host::{Application, HostError, ObjectId, BUILTIN_DISPLAY_MODES};
use lumber_feature::*;
use lumber_types::{Length, NominalSize, PropertyValue, MM_PER_INCH};
use proptest::prelude::*;
use shape_kernel::{sort_signatures, FaceSignature, KernelBundle, MockKernel, TruckKernel};

fn app_with(kernel: Box<dyn KernelBundle>) -> (Application, ObjectId) {
    let mut app = Application::new(kernel);
    app.new_document("Unnamed");
    let id = make_lumber(&mut app).unwrap();
    (app, id)
}

fn mock_app() -> (Application, ObjectId) {
    app_with(Box::new(MockKernel::new()))
}

fn set(app: &mut Application, id: ObjectId, name: &str, value: PropertyValue) -> Result<(), HostError> {
    let (doc, kernel) = app.active_with_kernel()?;
    doc.set_property(id, name, value, kernel)
}

fn inches(app: &Application, id: ObjectId, name: &str) -> f64 {
    let doc = app.active_document().unwrap();
    doc.object(id).unwrap().data.length(name).unwrap().as_inches()
}

fn bbox(app: &Application, id: ObjectId) -> [f64; 6] {
    let doc = app.active_document().unwrap();
    let shape = doc.object(id).unwrap().data.shape().unwrap();
    app.kernel().as_introspect().bounding_box(shape).unwrap()
}

fn signatures(app: &Application, id: ObjectId) -> Vec<FaceSignature> {
    let doc = app.active_document().unwrap();
    let shape = doc.object(id).unwrap().data.shape().unwrap();
    let mut sigs: Vec<FaceSignature> = app
        .kernel()
        .as_introspect()
        .compute_all_signatures(shape)
        .into_iter()
        .map(|(_, s)| s)
        .collect();
    sort_signatures(&mut sigs);
    sigs
}

fn assert_box_inches(b: [f64; 6], x: f64, y: f64, z: f64) {
    let want = [0.0, 0.0, 0.0, x * MM_PER_INCH, y * MM_PER_INCH, z * MM_PER_INCH];
    for i in 0..6 {
        assert!((b[i] - want[i]).abs() < 1e-6, "bbox[{i}]: {} vs {}", b[i], want[i]);
    }
}

#[test]
fn new_lumber_is_a_two_by_four_stud() {
    for kernel in [
        Box::new(MockKernel::new()) as Box<dyn KernelBundle>,
        Box::new(TruckKernel::new()),
    ] {
        let (app, id) = app_with(kernel);
        let doc = app.active_document().unwrap();
        let obj = doc.object(id).unwrap();

        assert_eq!(obj.data.name(), "Lumber");
        assert_eq!(obj.data.kind(), FEATURE_KIND);
        assert_eq!(obj.data.text("Size").unwrap(), "2x4");
        assert_eq!(obj.label(), "2x4_001");
        assert!((inches(&app, id, "Width") - 3.5).abs() < 1e-9);
        assert!((inches(&app, id, "Height") - 1.5).abs() < 1e-9);
        assert!((inches(&app, id, "Length") - 96.0).abs() < 1e-9);
        assert!(!obj.data.is_invalid());
        assert_box_inches(bbox(&app, id), 96.0, 3.5, 1.5);
    }
}

#[test]
fn every_size_sets_actual_dimensions() {
    let (mut app, id) = mock_app();
    for size in NominalSize::ALL {
        set(&mut app, id, "Size", PropertyValue::string(size.code())).unwrap();
        let w = size.actual_width_inches();
        let h = size.actual_height_inches();
        assert!((inches(&app, id, "Width") - w).abs() < 1e-9, "{size} width");
        assert!((inches(&app, id, "Height") - h).abs() < 1e-9, "{size} height");
        assert_box_inches(bbox(&app, id), 96.0, w, h);
    }
}

#[test]
fn recompute_is_idempotent() {
    for kernel in [
        Box::new(MockKernel::new()) as Box<dyn KernelBundle>,
        Box::new(TruckKernel::new()),
    ] {
        let (mut app, id) = app_with(kernel);
        let first_box = bbox(&app, id);
        let first = signatures(&app, id);

        let (doc, kernel) = app.active_with_kernel().unwrap();
        assert!(doc.recompute(kernel).is_ok());

        assert_eq!(bbox(&app, id), first_box);
        let second = signatures(&app, id);
        assert_eq!(first.len(), 6);
        for (a, b) in first.iter().zip(&second) {
            assert!(a.approx_eq(b, 1e-9), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn length_change_keeps_cross_section() {
    let (mut app, id) = mock_app();
    set(&mut app, id, "Length", PropertyValue::string("10 ft")).unwrap();
    assert!((inches(&app, id, "Width") - 3.5).abs() < 1e-9);
    assert!((inches(&app, id, "Height") - 1.5).abs() < 1e-9);
    assert_box_inches(bbox(&app, id), 120.0, 3.5, 1.5);
}

#[test]
fn label_suffix_survives_size_changes() {
    let (mut app, id) = mock_app();
    for (size, label) in [("4x4", "4x4_001"), ("1x12", "1x12_001"), ("2x4", "2x4_001")] {
        set(&mut app, id, "Size", PropertyValue::string(size)).unwrap();
        assert_eq!(app.active_document().unwrap().object(id).unwrap().label(), label);
    }
}

#[test]
fn invalid_size_never_builds_a_shape() {
    let (mut app, id) = mock_app();
    let before = bbox(&app, id);
    for bad in ["2x5", "2x4x6", "24", "", "4X4"] {
        assert!(set(&mut app, id, "Size", PropertyValue::string(bad)).is_err(), "{bad}");
    }
    assert_eq!(bbox(&app, id), before);
    assert_eq!(
        app.active_document().unwrap().object(id).unwrap().data.text("Size").unwrap(),
        "2x4"
    );
}

#[test]
fn zero_length_fails_and_rolls_back() {
    let (mut app, id) = mock_app();
    let err = set(&mut app, id, "Length", PropertyValue::string("0 in")).unwrap_err();
    let cause = err.proxy_source().and_then(|e| e.downcast_ref::<LumberError>());
    assert!(matches!(cause, Some(LumberError::Kernel(_))), "{err}");
    assert!((inches(&app, id, "Length") - 96.0).abs() < 1e-9);
}

#[test]
fn undo_restores_previous_size() {
    let (mut app, id) = mock_app();
    set(&mut app, id, "Size", PropertyValue::string("6x6")).unwrap();
    assert_box_inches(bbox(&app, id), 96.0, 5.5, 5.5);

    let (doc, kernel) = app.active_with_kernel().unwrap();
    doc.undo(kernel).unwrap();

    let doc = app.active_document().unwrap();
    let obj = doc.object(id).unwrap();
    assert_eq!(obj.data.text("Size").unwrap(), "2x4");
    assert_eq!(obj.label(), "2x4_001");
    assert_box_inches(bbox(&app, id), 96.0, 3.5, 1.5);

    let (doc, kernel) = app.active_with_kernel().unwrap();
    doc.redo(kernel).unwrap();
    assert_eq!(app.active_document().unwrap().object(id).unwrap().label(), "6x6_001");
}

#[test]
fn view_defaults_to_shaded() {
    let (app, id) = mock_app();
    let obj = app.active_document().unwrap().object(id).unwrap();
    assert_eq!(obj.view.data.display_mode(), Some("Shaded"));
    assert_eq!(obj.view.icon(), Some(LUMBER_ICON_XPM));
    assert!(obj.view.data.is_visible());
}

#[test]
fn display_mode_switch_passes_through() {
    let (mut app, id) = mock_app();
    let doc = app.active_document_mut().unwrap();
    doc.set_display_mode(id, "Wireframe").unwrap();
    assert_eq!(doc.object(id).unwrap().view.data.display_mode(), Some("Wireframe"));
    assert!(doc.set_display_mode(id, "Hidden Line").is_err());
}

#[test]
fn view_keeps_builtin_display_modes() {
    let (app, id) = mock_app();
    let obj = app.active_document().unwrap().object(id).unwrap();
    let Ok(PropertyValue::Enumeration { value }) = obj.view.data.properties().value("DisplayMode") else {
        panic!("DisplayMode is not an enumeration");
    };
    assert_eq!(value.choices(), BUILTIN_DISPLAY_MODES);
}

#[test]
fn hiding_the_view_leaves_the_board_alone() {
    let (mut app, id) = mock_app();
    let before = bbox(&app, id);
    let doc = app.active_document_mut().unwrap();
    doc.set_view_property(id, "Visibility", PropertyValue::Bool { value: false })
        .unwrap();

    let obj = doc.object(id).unwrap();
    assert!(!obj.view.data.is_visible());
    assert_eq!(obj.view.data.display_mode(), Some("Shaded"));
    assert_eq!(obj.label(), "2x4_001");
    assert_eq!(bbox(&app, id), before);
}

#[test]
fn reloaded_view_starts_fresh() {
    let (mut app, id) = mock_app();
    let doc = app.active_document_mut().unwrap();
    doc.reload_view_proxy(id, Box::new(ViewProviderLumber)).unwrap();
    let view = doc.object(id).unwrap().view.proxy().unwrap();
    assert_eq!(view.get_state(), None);
    assert_eq!(view.default_display_mode(), "Shaded");
}

#[test]
fn several_boards_get_unique_names() {
    let (mut app, first) = mock_app();
    let second = make_lumber(&mut app).unwrap();
    let doc = app.active_document().unwrap();
    assert_eq!(doc.object(first).unwrap().data.name(), "Lumber");
    assert_eq!(doc.object(second).unwrap().data.name(), "Lumber001");
    assert_eq!(doc.object(first).unwrap().label(), "2x4_001");
    assert_eq!(doc.object(second).unwrap().label(), "2x4_002");
    assert_eq!(doc.object_by_label("2x4_001").unwrap().id(), first);
    assert_eq!(doc.object_by_label("2x4_002").unwrap().id(), second);
    assert_eq!(doc.object_by_name("Lumber001").unwrap().id(), second);
    assert_eq!(doc.len(), 2);
}

#[test]
fn board_suffix_sticks_through_size_changes() {
    let (mut app, first) = mock_app();
    let second = make_lumber(&mut app).unwrap();
    set(&mut app, first, "Size", PropertyValue::string("4x4")).unwrap();
    set(&mut app, second, "Size", PropertyValue::string("4x4")).unwrap();

    let third = make_lumber(&mut app).unwrap();
    let doc = app.active_document().unwrap();
    assert_eq!(doc.object(first).unwrap().label(), "4x4_001");
    assert_eq!(doc.object(second).unwrap().label(), "4x4_002");
    assert_eq!(doc.object(third).unwrap().label(), "2x4_003");
}

#[test]
fn make_lumber_needs_an_active_document() {
    let mut app = Application::new(Box::new(MockKernel::new()));
    assert!(matches!(make_lumber(&mut app), Err(HostError::NoActiveDocument)));
}

proptest! {
    #[test]
    fn shape_follows_length(feet in 0.5f64..40.0, size in 0usize..17) {
        let (mut app, id) = mock_app();
        let size = NominalSize::ALL[size];
        let length = Length::from_feet(feet).unwrap();
        set(&mut app, id, "Size", PropertyValue::string(size.code())).unwrap();
        set(&mut app, id, "Length", PropertyValue::length(length)).unwrap();

        let b = bbox(&app, id);
        prop_assert!((b[3] - length.as_mm()).abs() < 1e-6);
        prop_assert!((b[4] - size.actual_width_inches() * MM_PER_INCH).abs() < 1e-6);
        prop_assert!((b[5] - size.actual_height_inches() * MM_PER_INCH).abs() < 1e-6);

        let before = signatures(&app, id);
        let (doc, kernel) = app.active_with_kernel().unwrap();
        prop_assert!(doc.recompute(kernel).is_ok());
        let after = signatures(&app, id);
        for (a, b) in before.iter().zip(&after) {
            prop_assert!(a.approx_eq(b, 1e-9));
        }
    }
}
