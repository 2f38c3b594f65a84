// Sub-area (板块) catalogue per district, used to bucket district listings
use std::collections::HashMap;

/// Catch-all bucket for sub-areas outside the catalogue.
pub const OTHER_SUBAREA: &str = "其他";

const GUANGZHOU: &[(&str, &[&str])] = &[
    (
        "天河",
        &[
            "珠江新城", "天河北", "天河公园", "体育中心", "石牌桥", "岗顶", "五山", "车陂", "东圃", "龙洞",
            "员村", "猎德", "华景", "天河客运站", "长兴", "棠下", "燕塘", "沙河", "林和", "华南理工",
            "前进", "黄村", "科韵路", "华师", "龙口西", "天润",
        ],
    ),
    (
        "越秀",
        &[
            "东山口", "北京路", "农林下路", "环市东", "淘金", "西门口", "公园前", "海珠广场", "小北",
            "东风东", "区庄", "建设六马路", "流花", "杨箕", "黄花岗", "二沙岛", "动物园", "越秀公园",
        ],
    ),
    (
        "荔湾",
        &[
            "芳村", "西关", "陈家祠", "中山八", "坑口", "花地湾", "黄沙", "西村", "广钢新城", "东漖",
            "白鹤洞", "龙津", "荔湾路",
        ],
    ),
    (
        "海珠",
        &[
            "江南西", "客村", "赤岗", "昌岗", "工业大道", "滨江东", "琶洲", "中大", "宝岗", "南洲",
            "万胜围", "江燕路", "晓港", "东晓南", "新港西", "大塘", "革新路",
        ],
    ),
    (
        "番禺",
        &[
            "市桥", "大石", "洛溪", "祈福", "华南新城", "万博", "钟村", "南村", "大学城", "番禺广场",
            "石碁", "沙湾", "汉溪长隆", "厦滘", "丽江花园",
        ],
    ),
    (
        "白云",
        &[
            "同和", "京溪", "新市", "三元里", "白云大道北", "嘉禾望岗", "黄石", "景泰", "机场路",
            "金沙洲", "永泰", "太和", "江高", "人和", "白云新城", "梅花园", "同德围",
        ],
    ),
    (
        "黄埔",
        &["科学城", "黄埔区府", "大沙地", "萝岗", "开发区", "知识城", "鱼珠", "长洲岛", "文冲", "夏园", "香雪"],
    ),
    ("增城", &["新塘", "增城广场", "荔城", "永和", "中新", "朱村", "仙村"]),
    ("花都", &["花都广场", "新华", "狮岭", "花东", "炭步", "花都汽车城"]),
    ("南沙", &["南沙中心", "金洲", "黄阁", "横沥", "蕉门", "东涌", "大岗"]),
    ("从化", &["从化城区", "街口", "温泉", "太平", "江埔"]),
];

/// Valid sub-areas keyed by district name (without the `区` suffix).
#[derive(Debug, Clone, Default)]
pub struct SubareaCatalog {
    districts: HashMap<String, Vec<String>>,
}

impl SubareaCatalog {
    /// Built-in catalogue of Guangzhou rental sub-areas.
    pub fn guangzhou() -> Self {
        let districts = GUANGZHOU
            .iter()
            .map(|(district, subareas)| {
                (
                    district.to_string(),
                    subareas.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { districts }
    }

    /// Replaces the list of every district present in `overrides`.
    pub fn with_overrides(mut self, overrides: &HashMap<String, Vec<String>>) -> Self {
        for (district, subareas) in overrides {
            let key = crate::utils::strip_district_suffix(district).to_string();
            self.districts.insert(key, subareas.clone());
        }
        self
    }

    pub fn subareas(&self, district: &str) -> &[String] {
        self.districts.get(district).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guangzhou_catalogue_has_all_districts() {
        let catalog = SubareaCatalog::guangzhou();
        for district in ["天河", "越秀", "荔湾", "海珠", "番禺", "白云", "黄埔", "增城", "花都", "南沙", "从化"] {
            assert!(!catalog.subareas(district).is_empty(), "{district} has no sub-areas");
        }
        assert!(catalog.subareas("天河").iter().any(|s| s == "珠江新城"));
        assert!(!catalog.subareas("海珠").iter().any(|s| s == "珠江新城"));
        assert!(catalog.subareas("深圳").is_empty());
    }

    #[test]
    fn overrides_replace_district_lists() {
        let mut overrides = HashMap::new();
        overrides.insert("天河区".to_string(), vec!["测试板块".to_string()]);
        let catalog = SubareaCatalog::guangzhou().with_overrides(&overrides);
        assert_eq!(catalog.subareas("天河"), ["测试板块".to_string()]);
        assert!(catalog.subareas("越秀").iter().any(|s| s == "东山口"));
    }
}
