//! Built-in starter layouts, one per mode.
//!
//! Presets are complete documents: they render without a data bag and pass
//! validation without warnings, so they double as authoring templates.

use serde_json::Value;

use crate::models::{
    ActionPosition, ActionType, BookingSettings, CalendarSettings, ContentAction, ContentItem,
    GuideSettings, ItinerarySettings, LayoutAction, LayoutConfig, LayoutMode, LayoutSection,
    Payload, SectionContent, SectionType, Spacing,
};

/// Starter layout for a mode.
pub fn preset(mode: LayoutMode) -> LayoutConfig {
    match mode {
        LayoutMode::Calendar => calendar(),
        LayoutMode::Guide => guide(),
        LayoutMode::Itinerary => itinerary(),
        LayoutMode::Booking => booking(),
    }
}

fn section(id: &str, section_type: SectionType, title: Option<&str>, items: Vec<ContentItem>) -> LayoutSection {
    let mut section = LayoutSection::new(id, section_type);
    section.title = title.map(String::from);
    if !items.is_empty() {
        section.content = Some(SectionContent::with_items(items));
    }
    section
}

fn item(id: &str, title: &str, metadata: &[(&str, Value)]) -> ContentItem {
    let mut item = ContentItem::new(id, title);
    for (key, value) in metadata {
        item.metadata.insert((*key).to_string(), value.clone());
    }
    item
}

fn payload(pairs: &[(&str, &str)]) -> Payload {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect()
}

fn floating(id: &str, label: &str, action: &str, action_type: ActionType) -> LayoutAction {
    LayoutAction {
        id: id.to_string(),
        label: label.to_string(),
        action_type,
        action: action.to_string(),
        payload: None,
        position: ActionPosition::Floating,
    }
}

fn item_action(id: &str, label: &str, action: &str, payload_pairs: &[(&str, &str)]) -> ContentAction {
    ContentAction {
        id: id.to_string(),
        label: label.to_string(),
        action_type: ActionType::Secondary,
        action: action.to_string(),
        payload: Some(payload(payload_pairs)),
        condition: None,
    }
}

fn itinerary() -> LayoutConfig {
    let mut layout = LayoutConfig::new(LayoutMode::Itinerary, "My Trip");
    layout.description = Some("Day by day plan".to_string());
    layout.itinerary_settings = Some(ItinerarySettings::default());

    let mut eiffel = item("eiffel", "Eiffel Tower", &[("date", "2025-06-03".into()), ("time", "10:00".into())]);
    eiffel.badge = Some("Booked".to_string());
    eiffel.actions.push(item_action("details-eiffel", "Details", "open_activity", &[("activityId", "eiffel")]));

    let mut day1 = section(
        "day-1",
        SectionType::Timeline,
        Some("Day 1"),
        vec![
            eiffel,
            item("lunch", "Lunch at Le Marais", &[("date", "2025-06-03".into()), ("time", "13:00".into())]),
        ],
    );
    day1.children.push(section(
        "day-1-tips",
        SectionType::Cards,
        Some("Nearby"),
        vec![item("seine", "Seine river walk", &[])],
    ));

    layout.sections = vec![
        section("header", SectionType::Header, Some("My Trip"), Vec::new()),
        day1,
        section(
            "stats",
            SectionType::Stats,
            Some("At a glance"),
            vec![
                item("days", "Days", &[("value", 3.into())]),
                item("activities", "Activities", &[("value", 7.into())]),
            ],
        ),
    ];
    layout.actions = vec![floating("save", "Save", "save_trip", ActionType::Primary)];
    layout
}

fn calendar() -> LayoutConfig {
    let mut layout = LayoutConfig::new(LayoutMode::Calendar, "Trip Calendar");
    layout.calendar_settings = Some(CalendarSettings::default());

    let mut alerts = section("alerts", SectionType::Alerts, Some("Alerts"), Vec::new());
    alerts.spacing = Spacing::Compact;

    layout.sections = vec![
        alerts,
        section(
            "month",
            SectionType::Calendar,
            Some("June"),
            vec![
                item("arrive", "Arrive in Lisbon", &[("date", "2025-06-10".into()), ("time", "09:30".into())]),
                item("tram", "Tram 28", &[("date", "2025-06-11".into())]),
                item("fado", "Fado evening", &[("date", "2025-06-11".into()), ("time", "21:00".into())]),
            ],
        ),
    ];
    layout.actions = vec![floating("add", "Add activity", "add_activity", ActionType::Primary)];
    layout
}

fn guide() -> LayoutConfig {
    let mut layout = LayoutConfig::new(LayoutMode::Guide, "City Guide");
    layout.guide_settings = Some(GuideSettings::default());

    let mut hero_item = ContentItem::new("hero", "Discover Kyoto");
    hero_item.image = Some("https://images.example.com/kyoto.jpg".to_string());

    let mut temple = item("kinkakuji", "Kinkaku-ji", &[("lat", 35.0394.into()), ("lng", 135.7292.into())]);
    temple.badge = Some("Top pick".to_string());

    let mut map = section(
        "map",
        SectionType::Map,
        Some("On the map"),
        vec![
            item("fushimi", "Fushimi Inari", &[("lat", 34.9671.into()), ("lng", 135.7727.into())]),
            item("gion", "Gion", &[("lat", 35.0037.into()), ("lng", 135.7788.into())]),
        ],
    );
    map.spacing = Spacing::Spacious;

    layout.sections = vec![
        section("hero", SectionType::Hero, None, vec![hero_item]),
        section("picks", SectionType::Recommendations, Some("Recommended"), vec![temple]),
        map,
        section(
            "footer",
            SectionType::Footer,
            None,
            vec![item("more", "More guides", &[("href", "/guides".into())])],
        ),
    ];
    layout.actions = vec![floating("share", "Share", "share_guide", ActionType::Secondary)];
    layout
}

fn booking() -> LayoutConfig {
    let mut layout = LayoutConfig::new(LayoutMode::Booking, "Bookings");
    layout.booking_settings = Some(BookingSettings::default());

    let mut hotel = item("hotel", "Hotel Lutetia", &[("price", 420.into())]);
    hotel.subtitle = Some("3 nights".to_string());
    hotel.badge = Some("Confirmed".to_string());
    hotel.actions.push(item_action("cancel-hotel", "Cancel", "cancel_booking", &[("bookingId", "hotel")]));
    if let Some(cancel) = hotel.actions.last_mut() {
        cancel.action_type = ActionType::Destructive;
    }

    let mut flight = item("flight", "AF 1234", &[("price", 180.into())]);
    flight.subtitle = Some("CDG → LIS".to_string());

    let mut guest = item("email", "Email", &[("input", "email".into()), ("required", true.into())]);
    guest.description = Some("Confirmation is sent here".to_string());

    let mut form = section("guest", SectionType::Form, Some("Guest details"), vec![guest]);
    form.subtitle = Some("Used for every booking".to_string());

    let mut cards = section("reservations", SectionType::Cards, Some("Reservations"), vec![hotel, flight]);
    cards.columns = Some(2);

    layout.sections = vec![cards, form];
    layout.actions = vec![floating("checkout", "Checkout", "checkout", ActionType::Primary)];
    layout
}
