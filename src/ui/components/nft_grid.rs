use crate::model::nft::{Nft, NftMetadata};
use crate::ui::theme::{FundColors, Shape, Spacing, Typography};
use egui::{CornerRadius, Frame, Margin, RichText, Stroke, Ui, Vec2};

fn nft_card(ui: &mut Ui, nft: &Nft, image_base_url: &str) {
    let dark_mode = ui.ctx().style().visuals.dark_mode;
    let metadata = nft.parsed_metadata();

    Frame::new()
        .fill(FundColors::surface(dark_mode))
        .stroke(Stroke::new(Shape::BORDER_WIDTH, FundColors::border(dark_mode)))
        .corner_radius(CornerRadius::same(Shape::RADIUS_MD))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(Spacing::CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(RichText::new(nft.display_name()).font(Typography::body()).strong());
                ui.label(
                    RichText::new(format!("#{}", nft.token_id))
                        .font(Typography::body_small())
                        .color(FundColors::text_secondary(dark_mode)),
                );
                match &metadata {
                    NftMetadata::Valid(_) => {}
                    NftMetadata::Missing | NftMetadata::Invalid(_) => {
                        let note = ui.label(
                            RichText::new("metadata unavailable")
                                .italics()
                                .color(FundColors::text_secondary(dark_mode)),
                        );
                        if let NftMetadata::Invalid(reason) = &metadata {
                            note.on_hover_text(reason.as_str());
                        }
                    }
                }
                ui.hyperlink_to("View image", nft.image_url(image_base_url));
            });
        });
}

/// Wrapping grid of collection cards. Shows a placeholder when `nfts` is empty.
pub fn nft_grid<'a>(ui: &mut Ui, nfts: impl Iterator<Item = &'a Nft>, image_base_url: &str) {
    let mut nfts = nfts.peekable();
    if nfts.peek().is_none() {
        ui.label("No pieces collected yet");
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = Vec2::splat(Spacing::SM);
        for nft in nfts {
            nft_card(ui, nft, image_base_url);
        }
    });
}
