//! Shared helpers for building small PDFs in memory.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One page of a generated document.
pub struct PageSpec {
    /// Content operations. `None` omits the Contents entry entirely.
    pub ops: Option<Vec<Operation>>,
}

impl PageSpec {
    pub fn new(ops: Vec<Operation>) -> Self {
        Self { ops: Some(ops) }
    }

    pub fn empty() -> Self {
        Self { ops: None }
    }
}

/// Build a US Letter document with one Type1 font (F1) and one 8x8
/// grayscale image XObject (Im1) available to every page.
pub fn build_pdf(pages: Vec<PageSpec>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 8,
            "Height" => 8,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        vec![0u8; 64],
    ));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        "XObject" => dictionary! { "Im1" => Object::Reference(image_id) },
    });

    let count = pages.len() as i64;
    let mut kids: Vec<Object> = Vec::new();

    for spec in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => Object::Reference(resources_id),
        };

        if let Some(ops) = spec.ops {
            let content = Content { operations: ops };
            let stream_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page.set("Contents", Object::Reference(stream_id));
        }

        let page_id = doc.add_object(page);
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Operations that draw `text` at (x, y) in font F1.
pub fn show_text(text: &str, x: f32, y: f32, size: f32) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Real(size)]),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Operations that place Im1 scaled to `w` x `h` at (x, y).
pub fn place_image(x: f32, y: f32, w: f32, h: f32) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                Object::Real(w),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(h),
                Object::Real(x),
                Object::Real(y),
            ],
        ),
        Operation::new("Do", vec!["Im1".into()]),
        Operation::new("Q", vec![]),
    ]
}

/// A 2x2 grid of single-word cells starting at `top_y`, columns at x=72
/// and x=300, rows 20pt apart.
pub fn table_ops(top_y: f32) -> Vec<Operation> {
    let mut ops = Vec::new();
    ops.extend(show_text("alpha", 72.0, top_y, 12.0));
    ops.extend(show_text("beta", 300.0, top_y, 12.0));
    ops.extend(show_text("gamma", 72.0, top_y - 20.0, 12.0));
    ops.extend(show_text("delta", 300.0, top_y - 20.0, 12.0));
    ops
}
