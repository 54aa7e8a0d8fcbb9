//! PDF fixtures built in memory for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

/// ToUnicode map sending every two-byte code to the same UTF-16 code unit.
const IDENTITY_UCS_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0000> <FFFF> <0000>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

/// Build a PDF with one page per entry, each line drawn in its own text block.
///
/// Lines are drawn in Courier, so only Latin-1 text survives extraction.
pub(crate) fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });

    assemble(doc, font_id.into(), pages, |line| Object::string_literal(line))
}

/// Like [`build_pdf`], with a Type0 font whose codes are UTF-16 code units,
/// so Hangul text comes back out of the extractor.
pub(crate) fn build_unicode_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let cmap_id = doc.add_object(Stream::new(
        Dictionary::new(),
        IDENTITY_UCS_CMAP.as_bytes().to_vec(),
    ));
    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => "NanumGothic",
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "NanumGothic",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![cid_font_id.into()],
        "ToUnicode" => cmap_id,
    });

    assemble(doc, font_id.into(), pages, |line| {
        let codes = line.encode_utf16().flat_map(u16::to_be_bytes).collect();
        Object::String(codes, StringFormat::Hexadecimal)
    })
}

/// A structurally valid PDF without any page.
pub(crate) fn empty_pdf() -> Vec<u8> {
    build_pdf(&[])
}

fn assemble(
    mut doc: Document,
    font: Object,
    pages: &[&[&str]],
    encode: impl Fn(&str) -> Object,
) -> Vec<u8> {
    let pages_id = doc.new_object_id();
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new(
                "Td",
                vec![72.into(), (760 - 20 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![encode(line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}
