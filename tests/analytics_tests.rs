use rent_lens::analyzer::classify::{classify_freshness, freshness_score};
use rent_lens::analyzer::{CityAnalyzer, DistrictAnalyzer, ListingAnalyzer};
use rent_lens::model::{Summary, ValueRange};
use rent_lens::normalizer::MAX_AREA;

const HEADER: &str = "标题,区域,地块,小区,面积,朝向,户型,楼层信息,价格,标签,详情页链接,维护时间";

fn blob(rows: &[&str]) -> String {
    format!("爬取数量: {}, 更新时间: 2024-05-01 10:00:00\n{HEADER}\n{}\n", rows.len(), rows.join("\n"))
}

fn sample() -> String {
    blob(&[
        "整租·珠江花园 2室1厅,天河,珠江新城,珠江花园,80㎡,南,2室1厅1卫,中楼层,6000,近地铁|精装,https://x/1,3天前维护",
        "整租·客村小区 1室1厅,海珠,客村,客村小区,40㎡,北,1室1厅1卫,低楼层,2800,近地铁,https://x/2,今天维护",
        "整租·天河北 3室2厅,天河,天河北,天河北苑,120㎡,南北,3室2厅2卫,高楼层,9000,精装,https://x/3,40天前维护",
        "整租·东山口 1室0厅,越秀,东山口,东山雅筑,30㎡,东,1室0厅1卫,低楼层,3500,近地铁,https://x/4,昨天维护",
        "整租·农林下 2室1厅,越秀,农林下路,东山雅筑,60㎡,南,2室1厅1卫,中楼层,5000,,https://x/5,5天前维护",
        "整租·大独栋 5室,天河,珠江新城,独栋别墅,300㎡,南,5室3厅,低楼层,8000,,https://x/6,今天维护",
        "整租·超大户 9室,番禺,市桥,豪宅,2500㎡,南,9室4厅,低楼层,30000,,https://x/7,今天维护",
    ])
}

#[test]
fn out_of_range_price_is_dropped_and_average_uses_the_rest() {
    let text = blob(&[
        "整租·A 1室1厅,天河,珠江新城,A苑,50,南,1室1厅1卫,低楼层,3000,,u1,今天",
        "整租·B 2室1厅,海珠,客村,B苑,80,南,2室1厅1卫,中楼层,6000,,u2,今天",
        "整租·C 2室1厅,海珠,客村,C苑,80,南,2室1厅1卫,中楼层,200000,,u3,今天",
    ]);
    let analyzer = ListingAnalyzer::from_text(&text);
    assert_eq!(analyzer.cleaned().len(), 2);
    assert_eq!(analyzer.summary().avg_price, 4500.0);
}

#[test]
fn whole_building_listing_is_excluded() {
    let text = blob(&["整租·独栋公寓 1室1厅,天河,珠江新城,A苑,50,南,1室1厅1卫,低楼层,3000,,u1,今天"]);
    let analyzer = ListingAnalyzer::from_text(&text);
    assert!(analyzer.dataset().is_empty());
    assert!(analyzer.cleaned().is_empty());
}

#[test]
fn empty_blob_yields_zero_values_everywhere() {
    let analyzer = ListingAnalyzer::from_text("");
    let summary = analyzer.summary();
    assert_eq!(summary, Summary::default());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.price_range, ValueRange { min: 0.0, max: 0.0 });
    assert!(analyzer.price_distribution().is_empty());
    assert!(analyzer.area_distribution().is_empty());
    assert!(analyzer.district_distribution().is_empty());
    assert!(analyzer.popular_communities(10).is_empty());
    assert!(analyzer.price_box_plot().is_empty());
    assert!(analyzer.price_area_coefficient().is_none());
    assert_eq!(analyzer.quality_metrics().total, 0.0);

    let city = CityAnalyzer::new(analyzer);
    assert!(city.district_overview().is_empty());
    assert!(city.district_flow().links.is_empty());

    let district = DistrictAnalyzer::from_text("", "天河区");
    assert!(district.records().is_empty());
    assert!(district.community_analysis().is_empty());
    assert!(district.sub_district_analysis().is_empty());
}

#[test]
fn freshness_scores_follow_the_day_table() {
    assert_eq!(freshness_score(classify_freshness("3天前")), Some(80.0));
    assert_eq!(freshness_score(classify_freshness("40天前")), Some(20.0));
    assert_eq!(freshness_score(classify_freshness("3天前维护")), Some(80.0));
}

#[test]
fn district_scope_strips_suffix_and_narrows() {
    let district = DistrictAnalyzer::from_text(&sample(), "天河区");
    assert_eq!(district.scope().key(), "天河");
    assert_eq!(district.records().len(), 2);
    assert!(district.records().iter().all(|r| r.district == "天河"));
}

#[test]
fn parsing_is_idempotent() {
    let text = sample();
    let a = ListingAnalyzer::from_text(&text);
    let b = ListingAnalyzer::from_text(&text);
    assert_eq!(a.cleaned(), b.cleaned());
    assert_eq!(a.normalize_stats(), b.normalize_stats());
}

#[test]
fn cleaned_records_satisfy_the_filter() {
    let analyzer = ListingAnalyzer::from_text(&sample());
    assert_eq!(analyzer.cleaned().len(), 5);
    for r in analyzer.cleaned() {
        assert!(r.price > 0.0 && r.price <= 100_000.0);
        assert!(r.area > 0.0 && r.area <= MAX_AREA);
        assert!(!r.title.is_empty());
        assert!(!r.district.is_empty());
        assert!(!r.layout.is_empty());
    }
}

#[test]
fn fixed_bucket_distributions_sum_to_dataset_size() {
    let analyzer = ListingAnalyzer::from_text(&sample());
    let n = analyzer.cleaned().len();
    assert_eq!(analyzer.price_distribution().iter().map(|b| b.value).sum::<usize>(), n);
    assert_eq!(analyzer.area_distribution().iter().map(|b| b.value).sum::<usize>(), n);

    let district = DistrictAnalyzer::from_text(&sample(), "越秀");
    let m = district.records().len();
    assert_eq!(district.detailed_price_distribution().iter().map(|b| b.count).sum::<usize>(), m);
    assert_eq!(district.area_distribution().iter().map(|b| b.count).sum::<usize>(), m);
}

#[test]
fn district_rollup_matches_its_own_prices() {
    let analyzer = ListingAnalyzer::from_text(&sample());
    let stats = analyzer.district_price_analysis();
    let tianhe = stats.iter().find(|s| s.name == "天河").expect("天河 rollup");
    assert_eq!(tianhe.count, 2);
    assert_eq!(tianhe.avg_price, 7500.0);
    assert_eq!(tianhe.min_price, 6000.0);
    assert_eq!(tianhe.max_price, 9000.0);

    let yuexiu = stats.iter().find(|s| s.name == "越秀").expect("越秀 rollup");
    assert_eq!(yuexiu.avg_price, 4250.0);
}

#[test]
fn rankings_break_ties_by_first_appearance() {
    let analyzer = ListingAnalyzer::from_text(&sample());
    let districts: Vec<(String, usize)> = analyzer
        .district_distribution()
        .into_iter()
        .map(|nv| (nv.name, nv.value))
        .collect();
    assert_eq!(
        districts,
        vec![
            ("天河".to_string(), 2),
            ("越秀".to_string(), 2),
            ("海珠".to_string(), 1),
        ]
    );

    let communities = analyzer.community_distribution();
    assert_eq!(communities[0].name, "东山雅筑");
    assert_eq!(communities[0].value, 2);
    assert_eq!(communities[1].name, "珠江花园");
}

#[test]
fn metadata_line_and_quoted_line_break_are_handled() {
    let text = format!(
        "处理后数量: 1\n{HEADER}\n整租·A 1室1厅,天河,珠江新城,A苑,50,南,1室1厅1卫,低楼层,3000,\"近地铁\n精装\",u1,今天\n"
    );
    let analyzer = ListingAnalyzer::from_text(&text);
    assert_eq!(analyzer.cleaned().len(), 1);
    let record = &analyzer.cleaned()[0];
    assert_eq!(record.tags, "近地铁 精装");
    assert_eq!(record.url, "u1");
    assert_eq!(record.update_time, "今天");
}

#[test]
fn city_views_cover_every_district() {
    let city = CityAnalyzer::from_text(&sample());
    let overview = city.district_overview();
    assert_eq!(overview.iter().map(|o| o.count).sum::<usize>(), 5);

    let ranges = city.district_price_ranges();
    for district in &ranges.districts {
        let total: usize = ranges.data[district].iter().sum();
        let expected = overview.iter().find(|o| &o.district == district).map(|o| o.count);
        assert_eq!(Some(total), expected);
    }
}

#[test]
fn stray_quote_drops_at_most_its_own_row() {
    let text = blob(&[
        "整租·A 5\" 1室1厅,天河,珠江新城,A苑,50,南,1室1厅1卫,低楼层,3000,,u1,今天",
        "整租·B 1室1厅,海珠,客村,B苑,40,北,1室1厅1卫,低楼层,2800,,u2,今天",
        "整租·C 2室1厅,越秀,东山口,C苑,60,南,2室1厅1卫,中楼层,5000,,u3,今天",
    ]);
    let analyzer = ListingAnalyzer::from_text(&text);
    let titles: Vec<&str> = analyzer.cleaned().iter().map(|r| r.title.as_str()).collect();
    assert!(titles.contains(&"整租·B 1室1厅"));
    assert!(titles.contains(&"整租·C 2室1厅"));
    assert_eq!(analyzer.normalize_stats().rejected_total(), 3 - titles.len());
}

#[test]
fn bom_prefixed_blob_keeps_every_record() {
    let text = format!(
        "\u{feff}{HEADER}\n整租·A 1室1厅,天河,珠江新城,A苑,50,南,1室1厅1卫,低楼层,3000,,u1,今天\n"
    );
    let analyzer = ListingAnalyzer::from_text(&text);
    assert_eq!(analyzer.cleaned().len(), 1);
    assert_eq!(analyzer.cleaned()[0].title, "整租·A 1室1厅");
    assert_eq!(analyzer.normalize_stats().rejected_total(), 0);

    let district = DistrictAnalyzer::from_text(&text, "天河区");
    assert_eq!(district.records().len(), 1);
}
