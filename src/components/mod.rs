pub mod amount_slider;
pub mod free_text_panel;
pub mod lead_form;
pub mod match_card;
pub mod navbar;
pub mod progress_bar;
pub mod question_card;
pub mod refine_panel;
