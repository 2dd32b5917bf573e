//! Whisper parsing scenarios.

use poe_trade_notifier::trade::{
    emoji_for_token, parse, Currency, LineKind, TradeParser, FALLBACK_EMOJI,
};

#[test]
fn test_headhunter_scenario() {
    let line = r#"Hi, I would like to buy your Headhunter listed for 150 chaos in Standard (stash tab ""A1""; position: left 1, top 1) @From Player1"#;
    let offer = parse(line).expect("offer");

    assert_eq!(offer.item_name, "Headhunter");
    assert_eq!(offer.price(), "150 chaos");
    assert_eq!(offer.currency, Currency::Chaos);
    assert_eq!(offer.notification_text(), "🪙 *150 chaos* Headhunter");
}

#[test]
fn test_english_round_trip_every_currency() {
    for currency in Currency::ALL {
        let line = format!(
            "2026/10/17 21:03:11 1 [INFO Client 1] @From Someone: Hi, I would like to buy your Mageblood listed for 12.5 {currency} in Settlers (stash tab \"$\"; position: left 3, top 4)"
        );
        let offer = parse(&line).expect("offer");
        assert_eq!(offer.item_name, "Mageblood");
        assert_eq!(offer.amount, "12.5");
        assert_eq!(offer.currency, currency);
        assert_eq!(offer.emoji, emoji_for_token(currency.as_str()));
    }
}

#[test]
fn test_russian_round_trip() {
    let line = "2026/10/17 21:03:11 1 [INFO Client 1] @От Покупатель: Здравствуйте, хочу купить у вас Голова охотника за 150 chaos в лиге Стандарт (секция \"A1\"; позиция: 1 столбец, 1 ряд)";
    let offer = parse(line).expect("offer");
    assert_eq!(offer.item_name, "Голова охотника");
    assert_eq!(offer.price(), "150 chaos");
    assert_eq!(offer.notification_text(), "🪙 *150 chaos* Голова охотника");
}

#[test]
fn test_malformed_price_scenario() {
    let parser = TradeParser::new();
    let line = "buy your Amulet listed for abc chaos @From X";
    assert_eq!(parser.classify(line), LineKind::Unparseable);
    assert!(parse(line).is_none());
}

#[test]
fn test_fallback_emoji() {
    assert_eq!(emoji_for_token("orb of fusing"), FALLBACK_EMOJI);
}

#[test]
fn test_parse_is_total_on_odd_input() {
    let inputs = [
        String::new(),
        "\u{0}".to_string(),
        "@From".to_string(),
        "buy your @From listed for".to_string(),
        "buy your x listed for 1 chaos".to_string(),
        "купить у вас @От за".to_string(),
        "😀".repeat(1000),
        format!("@From {}", "buy your ".repeat(500)),
    ];
    for input in &inputs {
        let _ = parse(input);
    }
}
