//! Markup fixtures for extractor and pipeline tests.

/// A product page exercising every field.
pub const FULL_PRODUCT_PAGE: &str = r#"<!doctype html>
<html lang="en-in">
<head><title>Acme Steel Kettle 1.5L : Amazon.in</title></head>
<body>
  <div id="wayfinding-breadcrumbs_feature_div">
    <ul class="a-unordered-list a-horizontal a-size-small">
      <li><span class="a-list-item"><a class="a-link-normal a-color-tertiary" href="/home">Home &amp; Kitchen</a></span></li>
      <li class="a-breadcrumb-divider"><span class="a-list-item a-color-tertiary">›</span></li>
      <li><span class="a-list-item"><a class="a-link-normal a-color-tertiary" href="/kitchen">Kitchen &amp; Dining</a></span></li>
      <li class="a-breadcrumb-divider"><span class="a-list-item a-color-tertiary">›</span></li>
      <li><span class="a-list-item"><a class="a-link-normal a-color-tertiary" href="/kettles">Kettles</a></span></li>
    </ul>
  </div>
  <div id="centerCol">
    <h1 id="title"><span id="productTitle" class="a-size-large">
        Acme Steel Kettle 1.5L
    </span></h1>
    <a id="bylineInfo" class="a-link-normal" href="/stores/acme">Visit the Acme Store</a>
    <span id="acrPopover" title="4.3 out of 5 stars"><i class="a-icon-star"></i></span>
    <span id="acrCustomerReviewText">1,024 ratings</span>
    <div id="dealBadge"><span class="badge-label">Limited time deal</span></div>
    <div id="corePrice">
      <span class="a-price">
        <span class="a-offscreen">₹1,299.00</span>
        <span class="a-price-symbol">₹</span><span class="a-price-whole">1,299<span class="a-price-decimal">.</span></span><span class="a-price-fraction">00</span>
      </span>
    </div>
    <div id="promoPriceBlockMessage"><span class="coupon">Apply 5% coupon</span></div>
    <div id="availability" class="a-section">
      <span class="a-size-medium a-color-success">  In stock  </span>
    </div>
  </div>
  <div id="imgTagWrapperId"><img id="landingImage" src="https://m.media-amazon.com/images/I/kettle.jpg"></div>
  <div class="video-block"></div>
  <div id="aplus"><h2>From the manufacturer</h2></div>
</body>
</html>"#;

/// A minimal page with only a title.
pub const MINIMAL_PRODUCT_PAGE: &str =
    r#"<html><body><span id="productTitle">Plain Notebook</span></body></html>"#;

/// An anti-automation challenge page.
pub const CAPTCHA_PAGE: &str = r#"<html><body>
  <h4>Enter the characters you see below</h4>
  <form method="get" action="/errors/validateCaptcha"><input id="captchacharacters"></form>
</body></html>"#;
