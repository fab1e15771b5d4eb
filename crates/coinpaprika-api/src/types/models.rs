/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs decoded from API responses
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::model::Model;

/// News
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    /// News title
    pub title: String,
    /// News url
    pub url: Url,
    /// News date
    #[serde(rename = "news_date")]
    pub date: DateTime<Utc>,
}

impl Model for News {}

/// Tweet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet text, eg. Bitcoin Core 0.17.0 Released
    pub status: String,
    /// Twitter user name, eg. bitcoincoreorg
    pub user_name: String,
    pub is_retweet: bool,
    pub date: DateTime<Utc>,
    /// Twitter link
    pub status_link: Url,
    /// Attached image link
    #[serde(default)]
    pub media_link: Option<Url>,
    /// Attached video link
    #[serde(default)]
    pub video_link: Option<Url>,
}

impl Model for Tweet {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ico {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(alias = "isNew")]
    pub is_new: bool,
}

impl Model for Ico {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_news_maps_news_date() {
        let json = br#"{
            "title": "Bitcoin hits new high",
            "url": "https://coinpaprika.com/news/btc-high",
            "news_date": "2019-01-03T10:15:00Z"
        }"#;

        let news = News::decode(json).expect("news");
        assert_eq!(
            news,
            News {
                title: "Bitcoin hits new high".to_string(),
                url: Url::parse("https://coinpaprika.com/news/btc-high").unwrap(),
                date: Utc.with_ymd_and_hms(2019, 1, 3, 10, 15, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_tweet_optional_links() {
        let json = br#"{
            "status": "Bitcoin Core 0.17.0 Released",
            "user_name": "bitcoincoreorg",
            "is_retweet": false,
            "date": "2018-10-03T12:00:00Z",
            "status_link": "https://twitter.com/bitcoincoreorg/status/1",
            "media_link": null
        }"#;

        let tweet = Tweet::decode(json).expect("tweet");
        assert_eq!(tweet.user_name, "bitcoincoreorg");
        assert!(!tweet.is_retweet);
        assert_eq!(tweet.media_link, None);
        assert_eq!(tweet.video_link, None);
    }

    #[test]
    fn test_ico_accepts_both_flag_spellings() {
        let snake = Ico::decode(br#"{"id":"x-ico","name":"X","symbol":"X","is_new":true}"#)
            .expect("snake");
        let camel = Ico::decode(br#"{"id":"x-ico","name":"X","symbol":"X","isNew":true}"#)
            .expect("camel");
        assert_eq!(snake, camel);
        assert!(snake.is_new);
    }

    #[test]
    fn test_model_list_decodes() {
        let json = br#"[{"id":"a","name":"A","symbol":"A","is_new":false}]"#;
        let icos = Vec::<Ico>::decode(json).expect("list");
        assert_eq!(icos.len(), 1);
    }

    #[test]
    fn test_missing_field_fails() {
        let err = News::decode(br#"{"title":"t","url":"https://a.b"}"#).unwrap_err();
        assert!(err.to_string().contains("news_date"));
    }
}
