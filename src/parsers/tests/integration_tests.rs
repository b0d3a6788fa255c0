use crate::error::ExtractError;
use crate::filter::LinkFilter;
use crate::parsers::Parser;
use crate::parsers::html::ContentExtractor;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        Parser::new(ContentExtractor::default(), LinkFilter::default())
    }

    #[test]
    fn test_parse_documentation_page() {
        let html = r#"<html><head><title>Tushare数据</title></head><body>
            <div class="left-nav">
              <a href="/document/2">平台介绍</a>
              <a href="/document/5">股票数据</a>
            </div>
            <div class="doc-content">
              <h1 class="doc-title">日线行情</h1>
              <p>接口：daily</p>
              <h2>输入参数</h2>
              <table>
                <thead><tr><th>名称</th><th>类型</th></tr></thead>
                <tbody><tr><td>ts_code</td><td>str</td></tr></tbody>
              </table>
              <h2>接口示例</h2>
              <pre>df = pro.daily(ts_code='000001.SZ')</pre>
            </div>
        </body></html>"#;
        let url = Url::parse("https://tushare.pro/document/2?doc_id=27").unwrap();

        let page = parser().parse(html, &url);

        assert_eq!(page.title, "日线行情");
        assert_eq!(
            page.content.unwrap(),
            "# 日线行情\n\n接口：daily\n\n\n## 输入参数\n\n| 名称 | 类型 |\n| --- | --- |\n| ts_code | str |\n\n\n## 接口示例\n\n```python\ndf = pro.daily(ts_code='000001.SZ')\n```\n"
        );
        let urls: Vec<&str> = page.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://tushare.pro/document/2",
                "https://tushare.pro/document/5"
            ]
        );
    }

    #[test]
    fn test_title_falls_back_to_url_segment() {
        let url = Url::parse("https://tushare.pro/document/41").unwrap();
        let page = parser().parse("<main><p>body only</p></main>", &url);
        assert_eq!(page.title, "41");
        assert_eq!(page.content.unwrap(), "body only\n");
    }

    #[test]
    fn test_empty_page_keeps_title_and_reports_missing_region() {
        let url = Url::parse("https://tushare.pro/document/13").unwrap();
        let page = parser().parse("<html><head><title>Empty</title></head></html>", &url);
        assert_eq!(page.title, "Empty");
        assert_eq!(page.content, Err(ExtractError::NoContentRegion));
        assert!(page.links.is_empty());
    }
}
