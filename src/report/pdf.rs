//! PDF assembly with lopdf.
//!
//! One content stream per page, appended in order — earlier pages are
//! never revisited. Text uses the base-14 Helvetica faces with WinAnsi
//! encoding; characters outside that set are folded by [`encode_win_ansi`]
//! so Polish strings stay legible without font embedding.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::error::RenderError;
use crate::pipeline::types::VisitRecord;
use crate::report::layout::{
    self, BAR_HEIGHT, BAR_WIDTH, BAR_X, BLOCK_HEIGHT, FIRST_BLOCK_Y, HEADER_Y, MARGIN_X,
    MISSING_COLOR, PAGE_HEIGHT, PAGE_WIDTH, VisitBlock,
};

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Render the full report: title header on every page, one block per
/// visit, in input order. Deterministic for equal input.
pub fn render_report(title: &str, visits: &[VisitRecord]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut page_ids: Vec<Object> = Vec::new();
    for page_visits in layout::paginate(visits) {
        let content = page_content(title, page_visits);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Content stream for one page: header, then the cursor walks down one
/// fixed-height block per visit.
fn page_content(title: &str, visits: &[VisitRecord]) -> Content {
    let mut ops: Vec<Operation> = Vec::new();

    text(&mut ops, "F2", 16.0, MARGIN_X, HEADER_Y, BLACK, title);

    let mut y = FIRST_BLOCK_Y;
    for visit in visits {
        draw_block(&mut ops, y, &layout::visit_block(visit));
        y -= BLOCK_HEIGHT;
    }

    Content { operations: ops }
}

fn draw_block(ops: &mut Vec<Operation>, y: f32, block: &VisitBlock) {
    // Color bar across the usable width.
    let (r, g, b) = block.tier_color;
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new(
        "re",
        vec![
            BAR_X.into(),
            (y - BAR_HEIGHT).into(),
            BAR_WIDTH.into(),
            BAR_HEIGHT.into(),
        ],
    ));
    ops.push(Operation::new("f", vec![]));

    text(ops, "F1", 10.0, MARGIN_X, y - 20.0, block.tier_color, block.tier_label);
    text(ops, "F1", 12.0, MARGIN_X, y - 38.0, BLACK, &block.headline);

    let address_color = if block.address_missing { MISSING_COLOR } else { BLACK };
    text(ops, "F1", 10.0, MARGIN_X + 10.0, y - 54.0, address_color, &block.address_line);

    let phone_color = if block.phone_missing { MISSING_COLOR } else { BLACK };
    text(ops, "F1", 10.0, MARGIN_X + 10.0, y - 70.0, phone_color, &block.phone_line);

    if let Some(problem) = &block.problem_line {
        text(ops, "F1", 10.0, MARGIN_X + 10.0, y - 86.0, BLACK, problem);
    }
}

/// One positioned text run.
fn text(
    ops: &mut Vec<Operation>,
    font: &str,
    size: f32,
    x: f32,
    y: f32,
    color: (f32, f32, f32),
    value: &str,
) {
    let (r, g, b) = color;
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(
            encode_win_ansi(value),
            StringFormat::Literal,
        )],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Encode text for a WinAnsi-encoded base-14 font.
///
/// Latin-1 characters map straight through; the Polish letters outside
/// Latin-1 fold to their ASCII base; en/em dashes use their WinAnsi
/// slots; anything else (emoji markers in titles) is dropped.
pub fn encode_win_ansi(value: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '–' => bytes.push(0x96),
            '—' => bytes.push(0x97),
            'ą' => bytes.push(b'a'),
            'ć' => bytes.push(b'c'),
            'ę' => bytes.push(b'e'),
            'ł' => bytes.push(b'l'),
            'ń' => bytes.push(b'n'),
            'ś' => bytes.push(b's'),
            'ź' | 'ż' => bytes.push(b'z'),
            'Ą' => bytes.push(b'A'),
            'Ć' => bytes.push(b'C'),
            'Ę' => bytes.push(b'E'),
            'Ł' => bytes.push(b'L'),
            'Ń' => bytes.push(b'N'),
            'Ś' => bytes.push(b'S'),
            'Ź' | 'Ż' => bytes.push(b'Z'),
            c if (c as u32) < 0x100 => bytes.push(c as u8),
            _ => {}
        }
    }
    // Dropped emoji can leave a leading gap on the line.
    while bytes.first() == Some(&b' ') {
        bytes.remove(0);
    }
    bytes
}
